//! Personal finance calculator CLI
//!
//! One subcommand per calculator. Results print as a short summary, or as
//! JSON with `--json`; time series can be written to CSV with `--csv`.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use finance_engine::emergency::compute_emergency_fund;
use finance_engine::export::{
    write_amortization_csv, write_growth_csv, write_lifetime_csv, write_loan_years_csv,
    write_pension_csv,
};
use finance_engine::interest::{
    compute_interest, interest_growth, ContributionFrequency, ContributionTiming, InterestMode,
    InterestRequest,
};
use finance_engine::loan::{compute_loan_schedule, yearly_summary, LoanRequest};
use finance_engine::net_worth::NetWorthRequest;
use finance_engine::pension::{compute_pension_projection, PensionRequest};
use finance_engine::retirement::{compute_retirement_plan, project_lifetime, RetirementRequest};

#[derive(Debug, Parser)]
#[command(name = "finance_engine", version, about = "Personal finance calculators")]
struct Cli {
    /// Print full results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compound or simple interest on a deposit with optional contributions
    Interest {
        #[arg(long)]
        principal: f64,
        /// Annual rate as a fraction (0.05 = 5%)
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Compounding periods per year
        #[arg(long, default_value_t = 12)]
        frequency: u32,
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[arg(long, value_enum, default_value_t = FrequencyArg::Monthly)]
        contribution_frequency: FrequencyArg,
        #[arg(long, value_enum, default_value_t = TimingArg::End)]
        timing: TimingArg,
        /// Simple interest instead of compound
        #[arg(long)]
        simple: bool,
        /// Write the yearly growth series to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Monthly payment and amortization schedule
    Loan {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Write the schedule to this file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Export one row per year instead of per month
        #[arg(long)]
        yearly: bool,
    },
    /// Savings at retirement against a 4% withdrawal target
    Retirement {
        #[arg(long)]
        current_age: u32,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long)]
        life_expectancy: u32,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, default_value_t = 0.0)]
        monthly_contribution: f64,
        #[arg(long)]
        annual_return: f64,
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,
        #[arg(long)]
        desired_income: f64,
        #[arg(long, default_value_t = 0.0)]
        other_income: f64,
        /// Write the lifetime savings path to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Workplace pension growth to retirement (percent inputs: 8 = 8%)
    Pension {
        #[arg(long)]
        salary: f64,
        #[arg(long)]
        employee_pct: f64,
        #[arg(long)]
        employer_match_pct: f64,
        #[arg(long, default_value_t = 0.0)]
        salary_growth_pct: f64,
        #[arg(long)]
        return_pct: f64,
        #[arg(long)]
        current_age: u32,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long, default_value_t = 0.0)]
        current_value: f64,
        /// Write the yearly breakdown to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Emergency fund target and progress
    EmergencyFund {
        #[arg(long)]
        monthly_expenses: f64,
        #[arg(long, default_value_t = 6)]
        months: u32,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
    },
    /// Net worth from a JSON file of assets and liabilities
    NetWorth {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Monthly,
    Quarterly,
    Annually,
}

impl From<FrequencyArg> for ContributionFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => ContributionFrequency::Monthly,
            FrequencyArg::Quarterly => ContributionFrequency::Quarterly,
            FrequencyArg::Annually => ContributionFrequency::Annually,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimingArg {
    Start,
    End,
}

impl From<TimingArg> for ContributionTiming {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Start => ContributionTiming::Start,
            TimingArg::End => ContributionTiming::End,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Interest {
            principal,
            rate,
            years,
            frequency,
            contribution,
            contribution_frequency,
            timing,
            simple,
            csv,
        } => {
            let request = InterestRequest {
                mode: if simple { InterestMode::Simple } else { InterestMode::Compound },
                principal,
                annual_rate: rate,
                years,
                compound_frequency: frequency,
                contribution,
                contribution_frequency: contribution_frequency.into(),
                contribution_timing: timing.into(),
            };
            let result = compute_interest(&request)?;
            if let Some(path) = csv {
                let growth = interest_growth(&request)?;
                write_growth_csv(create(&path)?, &growth)?;
                println!("Growth series written to: {}", path.display());
            }
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Final amount:        ${:.2}", result.final_amount);
                println!("Total contributions: ${:.2}", result.total_contributions);
                println!("Interest earned:     ${:.2}", result.interest_earned);
            }
        }
        Command::Loan {
            principal,
            rate,
            years,
            csv,
            yearly,
        } => {
            let request = LoanRequest::new(principal, rate, years)?;
            let result = compute_loan_schedule(&request)?;
            if let Some(path) = csv {
                if yearly {
                    write_loan_years_csv(create(&path)?, &yearly_summary(&result))?;
                } else {
                    write_amortization_csv(create(&path)?, &result.schedule)?;
                }
                println!("Schedule written to: {}", path.display());
            }
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Monthly payment: ${:.2}", result.monthly_payment);
                println!("Total interest:  ${:.2}", result.total_interest);
                println!("Total cost:      ${:.2}", result.total_cost);
                println!("Payments:        {}", result.schedule.len());
            }
        }
        Command::Retirement {
            current_age,
            retirement_age,
            life_expectancy,
            savings,
            monthly_contribution,
            annual_return,
            inflation,
            desired_income,
            other_income,
            csv,
        } => {
            let request = RetirementRequest {
                current_age,
                retirement_age,
                life_expectancy,
                current_savings: savings,
                monthly_contribution,
                annual_return,
                inflation_rate: inflation,
                desired_annual_income: desired_income,
                expected_annual_other_income: other_income,
            };
            let result = compute_retirement_plan(&request)?;
            if let Some(path) = csv {
                write_lifetime_csv(create(&path)?, &project_lifetime(&request)?)?;
                println!("Lifetime projection written to: {}", path.display());
            }
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Years to retirement:    {}", result.years_to_retirement);
                println!("Years in retirement:    {}", result.years_in_retirement);
                println!("Projected savings:      ${:.2}", result.total_savings_at_retirement);
                println!("Required savings:       ${:.2}", result.required_savings);
                println!("Shortfall:              ${:.2}", result.shortfall);
                println!(
                    "Suggested contribution: ${:.2}/month",
                    result.suggested_monthly_contribution
                );
            }
        }
        Command::Pension {
            salary,
            employee_pct,
            employer_match_pct,
            salary_growth_pct,
            return_pct,
            current_age,
            retirement_age,
            current_value,
            csv,
        } => {
            let request = PensionRequest {
                current_salary: salary,
                employee_contribution_pct: employee_pct,
                employer_match_pct,
                annual_salary_growth_pct: salary_growth_pct,
                annual_return_pct: return_pct,
                current_age,
                retirement_age,
                current_pension_value: current_value,
            };
            let result = compute_pension_projection(&request)?;
            if let Some(path) = csv {
                write_pension_csv(create(&path)?, &result.years)?;
                println!("Yearly breakdown written to: {}", path.display());
            }
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Final pension value:    ${:.2}", result.final_pension_value);
                println!("Employee contributions: ${:.2}", result.total_employee_contributions);
                println!("Employer contributions: ${:.2}", result.total_employer_contributions);
                println!("Investment returns:     ${:.2}", result.total_investment_returns);
            }
        }
        Command::EmergencyFund {
            monthly_expenses,
            months,
            savings,
        } => {
            let result = compute_emergency_fund(monthly_expenses, months, savings)?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Required fund: ${:.2}", result.required_fund);
                println!("Shortfall:     ${:.2}", result.shortfall);
                println!("Funded:        {:.1}% ({:?})", result.funding_percentage, result.status);
            }
        }
        Command::NetWorth { input } => {
            let file = File::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            let request: NetWorthRequest = serde_json::from_reader(file)
                .with_context(|| format!("parsing {}", input.display()))?;
            let result = request.compute()?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Total assets:      ${:.2}", result.total_assets);
                println!("Total liabilities: ${:.2}", result.total_liabilities);
                println!("Net worth:         ${:.2}", result.net_worth);
                for (category, value) in &result.assets_by_category {
                    println!("  + {:<28} ${:.2}", category, value);
                }
                for (category, value) in &result.liabilities_by_category {
                    println!("  - {:<28} ${:.2}", category, value);
                }
            }
        }
    }

    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
