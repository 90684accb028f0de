use common::cli::{format_food, parse_cli_args, Action, USAGE};
use common::config::Config;
use common::dashboard::{Dashboard, Outcome, SkipReason};
use common::errors::{Error, Result};
use common::remote::HttpFoodApi;
use common::telemetry;

fn print_items(dashboard: &Dashboard<HttpFoodApi>) {
    if dashboard.items().is_empty() {
        println!("No food yet");
    }
    for food in dashboard.items() {
        println!("{}", format_food(food));
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(std::env::args())?;
    let config = Config::from_env_with_target(options.target)?;

    let mut dashboard = Dashboard::new(HttpFoodApi::new(&config.address), config.policy);
    tracing::debug!(
        address = dashboard.api().address(),
        policy = ?config.policy,
        "mounting dashboard"
    );
    dashboard.mount()?;

    let outcome = match options.action {
        Action::List => Outcome::Applied,
        Action::Add(food) => dashboard.add_food(food)?,
        Action::Edit { id, update } => {
            let food = dashboard
                .state()
                .find(id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("No food with id {}", id)))?;
            dashboard.edit_food(food);
            dashboard.update_food(update)?
        }
        Action::Delete(id) => dashboard.delete_food(id)?,
    };

    if let Outcome::Skipped(reason) = outcome {
        match reason {
            SkipReason::LegacyGuard => {
                println!("Update skipped (FOOD_DASHBOARD_UPDATE_GUARD=legacy)")
            }
            other => println!("Nothing done: {:?}", other),
        }
    }

    print_items(&dashboard);
    Ok(())
}

fn main() {
    telemetry::init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        if matches!(err, Error::Cli(_)) {
            eprintln!("{}", USAGE);
        }
        std::process::exit(1);
    }
}
