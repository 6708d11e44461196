//! elasticity-runner: headless front end for the Elasticity Desk.
//!
//! Usage:
//!   elasticity-runner --data-dir ./data --category Toys
//!   elasticity-runner --data-dir ./data --category Toys --tranche "£3-£10" --model rf --change -10
//!   elasticity-runner --data-dir ./data --ipc-mode

use anyhow::Result;
use elasticity_core::{
    buyer_fee::render_impact_table,
    command::DashboardCommand,
    dashboard::Dashboard,
    error::ElasticityError,
    presentation::DeltaTone,
    simulation::parse_price_change,
    types::{ElasticityModel, PriceTranche},
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let scores = string_arg(&args, "--scores");

    // A failed load is fatal: nothing below runs without a table.
    let dashboard = Dashboard::build_with_scores(data_dir, scores)?;

    if ipc_mode {
        return run_ipc_loop(&dashboard);
    }

    let category = string_arg(&args, "--category");
    let tranche = string_arg(&args, "--tranche")
        .map(str::parse::<PriceTranche>)
        .transpose()?;
    let model = string_arg(&args, "--model")
        .map(str::parse::<ElasticityModel>)
        .transpose()?;
    let change = string_arg(&args, "--change")
        .map(parse_price_change)
        .transpose()?;

    if json {
        print_json(&dashboard, category, tranche, model, change)
    } else {
        print_summary(&dashboard, category, tranche, model, change)
    }
}

fn run_ipc_loop(dashboard: &Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: DashboardCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match dashboard.handle(cmd) {
            Ok(None) => break,
            Ok(Some(response)) => {
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            }
            Err(e) if !e.is_fatal() => {
                let err_json = serde_json::json!({ "error": e.to_string(), "fatal": false });
                writeln!(stdout, "{}", err_json)?;
            }
            Err(e) => return Err(e.into()),
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_json(
    dashboard: &Dashboard,
    category: Option<&str>,
    tranche: Option<PriceTranche>,
    model: Option<ElasticityModel>,
    change: Option<f64>,
) -> Result<()> {
    let command = match (category, tranche) {
        (Some(category), Some(tranche)) => DashboardCommand::Simulate {
            category: category.to_string(),
            tranche,
            model,
            price_change_percent: change,
        },
        (Some(category), None) => DashboardCommand::Curve { category: category.to_string() },
        _ => DashboardCommand::GetOptions,
    };

    match dashboard.handle(command) {
        Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
        Err(e) if !e.is_fatal() => {
            println!("{}", serde_json::json!({ "error": e.to_string(), "fatal": false }));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_summary(
    dashboard: &Dashboard,
    category: Option<&str>,
    tranche: Option<PriceTranche>,
    model: Option<ElasticityModel>,
    change: Option<f64>,
) -> Result<()> {
    let options = dashboard.options();
    let symbol = &dashboard.config.currency_symbol;

    println!("Elasticity Desk: elasticity-runner");
    println!("  rows:        {}", dashboard.table().len());
    println!("  categories:  {}", options.categories.len());
    println!(
        "  tranches:    {}",
        options.tranches.iter().map(|t| t.label()).collect::<Vec<_>>().join(", ")
    );
    println!();

    println!("=== BUYER FEE IMPACT ===");
    print!("{}", render_impact_table(&dashboard.fee_impact()?, symbol));
    println!();

    let Some(category) = category else {
        println!("(pass --category to view an elasticity curve)");
        return Ok(());
    };

    println!("=== ELASTICITY CURVE: {category} ===");
    match dashboard.curve(category) {
        Ok(curve) => print!("{}", curve.render_table()),
        Err(e @ ElasticityError::NoDataForSelection { .. }) => println!("  warning: {e}"),
        Err(e) => return Err(e.into()),
    }
    println!();

    let Some(tranche) = tranche else {
        return Ok(());
    };

    let query = dashboard.query(category, tranche, model, change);
    println!("=== PRICE CHANGE SIMULATION ===");
    println!("  category:     {}", query.category);
    println!("  tranche:      {}", query.tranche);
    println!("  model:        {}", query.model);
    println!("  price change: {:+.1}%", query.price_change_percent);

    match dashboard.simulate(&query) {
        Ok(result) => {
            for line in dashboard.report(&result).lines {
                let marker = match line.tone {
                    Some(DeltaTone::Gain) => "+",
                    Some(DeltaTone::Loss) => "-",
                    None => " ",
                };
                println!("  {marker} {}: {}", line.label, line.value);
            }
        }
        Err(e @ ElasticityError::NoDataForSelection { .. }) => {
            println!("  warning: {e}");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
