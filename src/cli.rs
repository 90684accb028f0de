use crate::api::{Food, FoodUpdate, NewFood};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Default address for both the client and the server
///
/// Overridden by `FOOD_DASHBOARD_ADDRESS`, or by the first argument of the client.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:9898";

/// Errors that can occur when parsing the command line arguments
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CLIError {
    #[error("Invalid target format. Should be <host>:<port>")]
    InvalidUrlFormat,
    #[error("Missing parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("Invalid parameter '{0}'")]
    InvalidParameter(String),
    #[error("Unknown action '{0}', expected list, add, edit or delete")]
    UnknownAction(String),
}

/// Validate the format of the TCP address provided by the user
///
/// Returns its input if the address is in the format <host>:<port>, otherwise InvalidUrlFormat
pub fn validate_address(url: &str) -> std::result::Result<&str, CLIError> {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    let re = ADDRESS.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9\.\-]+:\d{1,5}$").expect("address pattern is valid")
    });
    if re.is_match(url) {
        Ok(url)
    } else {
        Err(CLIError::InvalidUrlFormat)
    }
}

/// What the user asked the client to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add(NewFood),
    Edit { id: u32, update: FoodUpdate },
    Delete(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CLIOptions {
    /// Server address given on the command line, if any
    pub target: Option<String>,
    pub action: Action,
}

pub const USAGE: &str = "usage: client [<host>:<port>] <action>
actions:
    list
    add <name> <description> <price> <image>
    edit <id> [name=..] [description=..] [price=..] [image=..] [available=true|false]
    delete <id>";

fn parse_id(arg: Option<String>) -> std::result::Result<u32, CLIError> {
    let arg = arg.ok_or(CLIError::MissingParameter("id"))?;
    arg.parse::<u32>()
        .map_err(|_| CLIError::InvalidParameter(arg))
}

fn parse_update<I>(args: I) -> std::result::Result<FoodUpdate, CLIError>
where
    I: Iterator<Item = String>,
{
    let mut update = FoodUpdate::default();
    for arg in args {
        let (field, value) = arg
            .split_once('=')
            .ok_or_else(|| CLIError::InvalidParameter(arg.clone()))?;
        let value = value.to_string();
        match field {
            "name" => update.name = Some(value),
            "description" => update.description = Some(value),
            "price" => update.price = Some(value),
            "image" => update.image = Some(value),
            "available" => {
                update.available = Some(
                    value
                        .parse::<bool>()
                        .map_err(|_| CLIError::InvalidParameter(arg.clone()))?,
                )
            }
            _ => return Err(CLIError::InvalidParameter(arg.clone())),
        }
    }
    Ok(update)
}

/// Parse the client arguments, program name included
pub fn parse_cli_args<I>(mut args: I) -> std::result::Result<CLIOptions, CLIError>
where
    I: Iterator<Item = String>,
{
    args.next(); // Skip the program name
    let first = args
        .next()
        .ok_or(CLIError::MissingParameter("target or action"))?;

    let (target, action) = match validate_address(&first) {
        Ok(target) => (
            Some(target.to_string()),
            args.next().ok_or(CLIError::MissingParameter("action"))?,
        ),
        Err(_) => (None, first),
    };

    let action = match action.to_ascii_lowercase().as_str() {
        "list" => Action::List,
        "add" => {
            let mut field = |name| args.next().ok_or(CLIError::MissingParameter(name));
            Action::Add(NewFood {
                name: field("name")?,
                description: field("description")?,
                price: field("price")?,
                image: field("image")?,
                available: true,
            })
        }
        "edit" => {
            let id = parse_id(args.next())?;
            let update = parse_update(args.by_ref())?;
            if update.is_empty() {
                return Err(CLIError::MissingParameter("field=value"));
            }
            Action::Edit { id, update }
        }
        "delete" => Action::Delete(parse_id(args.next())?),
        _ => return Err(CLIError::UnknownAction(action)),
    };

    Ok(CLIOptions { target, action })
}

/// One line per food, the way the list shows it
pub fn format_food(food: &Food) -> String {
    format!(
        "#{:<4} {:<24} {:>8}  {:<11} {}",
        food.id,
        food.name,
        food.price,
        if food.available { "available" } else { "unavailable" },
        food.description
    )
}
