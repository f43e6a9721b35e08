//! Command-line front end over the `unital` library, grounded on the
//! teacher's `ucum-cli/src/main.rs` `clap::Parser`/`Subcommand` idiom,
//! narrowed to this crate's three operations.

use clap::{Parser, Subcommand};
use unital::{repr, UnitDatabase, WithUnit};

#[derive(Parser, Debug)]
#[command(name = "unital", version, about = "Units-of-measurement engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a unit formula and print its `repr`.
    Parse { formula: String },
    /// Convert a value from one unit to another.
    Convert {
        value: f64,
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
    },
    /// Print a formula's base units and whether its scale is rational-only.
    Analyze { formula: String },
}

fn main() -> anyhow::Result<()> {
    human_panic::setup_panic!();
    let cli = Cli::parse();
    let mut db = UnitDatabase::with_default_catalog();

    match cli.command {
        Commands::Parse { formula } => {
            let unit = db.parse_unit_formula(&formula)?;
            println!("{}", repr(&unit));
        }
        Commands::Convert { value, from, to } => {
            let from_unit = db.parse_unit_formula(&from)?;
            let to_unit = db.parse_unit_formula(&to)?;
            let quantity = WithUnit::from_number(value).multiply(&from_unit)?;
            let converted = quantity.in_units_of(&to_unit)?;
            println!("{converted}");
        }
        Commands::Analyze { formula } => {
            let unit = db.parse_unit_formula(&formula)?;
            println!("base units: {}", unit.base_units.format());
            println!("rational-only scale: {}", unit.scale.is_rational_only());
        }
    }
    Ok(())
}
