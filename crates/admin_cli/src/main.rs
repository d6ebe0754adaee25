use std::{error::Error, io::Write};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{CallOffOrder, Contract, Currency, CurrencyAmount, SqlStore};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Date format used by the catalog commands.
const DATE_FORMAT: &str = "%d.%m.%Y";

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
        pub is_admin: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "cmas_admin")]
#[command(about = "Admin utilities for CMAS (bootstrap users, contracts and call-off orders)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./cmas.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Contract(ContractCmd),
    CallOffOrder(CallOffOrderCmd),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    /// Allow the user to change or delete approved requests.
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct ContractCmd {
    #[command(subcommand)]
    command: ContractCommand,
}

#[derive(Subcommand, Debug)]
enum ContractCommand {
    Create(ContractCreateArgs),
}

#[derive(Args, Debug)]
struct ContractCreateArgs {
    #[arg(long)]
    number: String,
    #[arg(long)]
    contractor: String,
    /// Time sheet amounts already include VAT.
    #[arg(long)]
    vat_included: bool,
    /// Contracted amount as `CODE=VALUE`, e.g. `RUR=1000000`. Repeatable.
    #[arg(long = "amount", value_parser = parse_amount)]
    amounts: Vec<CurrencyAmount>,
}

#[derive(Args, Debug)]
struct CallOffOrderCmd {
    #[command(subcommand)]
    command: CallOffOrderCommand,
}

#[derive(Subcommand, Debug)]
enum CallOffOrderCommand {
    Create(CallOffOrderCreateArgs),
}

#[derive(Args, Debug)]
struct CallOffOrderCreateArgs {
    #[arg(long)]
    contract: String,
    #[arg(long)]
    assignee: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    position: String,
    /// First billable day, `dd.mm.yyyy`.
    #[arg(long, value_parser = parse_date)]
    start: NaiveDate,
    /// Last billable day, `dd.mm.yyyy`.
    #[arg(long, value_parser = parse_date)]
    finish: NaiveDate,
    #[arg(long, default_value = "RUR")]
    currency: String,
}

fn parse_amount(raw: &str) -> Result<CurrencyAmount, String> {
    let (code, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=VALUE, got {raw}"))?;
    let currency = Currency::try_from(code).map_err(|err| err.to_string())?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount: {value}"))?;
    Ok(CurrencyAmount::new(currency, value))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date {raw}, expected dd.mm.yyyy"))
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn say(line: &str) -> CliResult<()> {
    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(line),
    )?;
    out.flush()?;
    Ok(())
}

/// Read a line from the terminal, echoing `*` for each character.
fn read_secret(prompt: &str) -> CliResult<String> {
    let _raw = RawModeGuard::enter()?;
    say(prompt)?;

    let mut out = std::io::stderr();
    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };
        let control = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Enter => break,
            KeyCode::Char('c') if control => {
                say("\r\n")?;
                return Err("interrupted".into());
            }
            KeyCode::Backspace if secret.pop().is_some() => {
                execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
            }
            KeyCode::Char(ch) if !control => {
                secret.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => continue,
        }
        out.flush()?;
    }
    say("\r\n")?;
    Ok(secret)
}

fn read_new_password() -> CliResult<String> {
    for _ in 0..3 {
        let password = read_secret("Password: ")?;
        if password.is_empty() {
            say("Password must not be empty.\r\n")?;
        } else if read_secret("Confirm password: ")? == password {
            return Ok(password);
        } else {
            say("Passwords do not match. Try again.\r\n")?;
        }
    }
    Err("too many attempts".into())
}

async fn connect_db(database_url: &str) -> CliResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn create_user(db: &DatabaseConnection, args: UserCreateArgs) -> CliResult<()> {
    if users::Entity::find_by_id(args.username.clone())
        .one(db)
        .await?
        .is_some()
    {
        return Err(format!("user already exists: {}", args.username).into());
    }

    let password = read_new_password()?;
    let user = users::ActiveModel {
        username: Set(args.username.clone()),
        password: Set(password),
        is_admin: Set(args.admin),
    };
    users::Entity::insert(user).exec(db).await?;

    let role = if args.admin { "admin" } else { "user" };
    println!("created {role}: {}", args.username);
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => create_user(&db, args).await?,
        Command::Contract(ContractCmd {
            command: ContractCommand::Create(args),
        }) => {
            let contract = Contract::new(
                args.number,
                args.contractor,
                args.vat_included,
                args.amounts,
            );
            SqlStore::new(db).insert_contract(&contract).await?;
            println!("created contract: {} ({})", contract.number, contract.id);
        }
        Command::CallOffOrder(CallOffOrderCmd {
            command: CallOffOrderCommand::Create(args),
        }) => {
            let currency = Currency::try_from(args.currency.as_str())?;
            let order = CallOffOrder::new(
                args.contract,
                args.assignee,
                args.name,
                args.position,
                args.start,
                args.finish,
                currency,
            )?;
            SqlStore::new(db).insert_call_off_order(&order).await?;
            println!("created call-off order: {} ({})", order.assignee, order.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_argument_is_code_and_value() {
        let amount = parse_amount("rur=1500.5").unwrap();
        assert_eq!(amount.currency.code(), "RUR");
        assert_eq!(amount.value, 1500.5);

        assert!(parse_amount("RUR").is_err());
        assert!(parse_amount("RUR=lots").is_err());
    }

    #[test]
    fn dates_use_day_first_format() {
        assert_eq!(
            parse_date("31.01.2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(parse_date("2024-01-31").is_err());
    }

    #[test]
    fn cli_reads_repeated_amounts() {
        let cli = Cli::try_parse_from([
            "cmas_admin",
            "contract",
            "create",
            "--number",
            "CT-1",
            "--contractor",
            "Geo Survey LLC",
            "--amount",
            "RUR=1000",
            "--amount",
            "USD=10",
        ])
        .unwrap();
        let Command::Contract(ContractCmd {
            command: ContractCommand::Create(args),
        }) = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(args.amounts.len(), 2);
        assert!(!args.vat_included);
    }
}
