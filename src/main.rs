use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use skycast_ui::{ForecastModel, ForecastView, StatusNotifier, FULL_OPACITY};
use skycast_weather::catalog::RECENT_GROUP_LABEL;
use skycast_weather::OptionGroup;

/// 7-day forecast for a city from a CSV list, the built-in list, or your location
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with City, Country, Latitude, Longitude columns
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Only show cities whose label contains this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Fetch the forecast for the first visible city matching this text
    #[arg(short, long)]
    city: Option<String>,

    /// Fetch the forecast for the configured location
    #[arg(long, conflicts_with = "city")]
    here: bool,

    /// List the selectable cities and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    skycast_core::init()?;
    tracing::info!("SkyCast started");

    let mut app = skycast_core::App::new()?;
    app.initialize()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("skycast-tokio")
        .build()?;

    let mut model = ForecastModel::from_config(app.config(), runtime.handle().clone())?;
    model.load_defaults();

    if let Some(path) = &cli.csv {
        model.load_csv_file(path);
    }
    if let Some(term) = &cli.filter {
        model.set_filter(term);
    }

    if cli.list {
        print_options(&model);
    } else if cli.here {
        model.locate();
    } else if let Some(query) = &cli.city {
        if model.select_matching(query) {
            model.get_weather();
        } else {
            model.status().set(format!("No city matches '{}'", query));
        }
    } else {
        model.get_weather();
    }

    runtime.block_on(model.run_until_idle());

    print_view(&model);
    print_status(model.status());

    app.shutdown()?;
    tracing::info!("SkyCast exited");
    Ok(())
}

fn print_options(model: &ForecastModel) {
    let catalog = model.state().catalog();
    let mut in_recent = false;
    for (index, option) in catalog.visible() {
        if option.group == OptionGroup::Recent && !in_recent {
            println!("-- {} --", RECENT_GROUP_LABEL);
            in_recent = true;
        }
        println!("{:>3}  {}", index, option.label);
    }
}

/// A faded status line is printed dim
fn print_status(status: &StatusNotifier) {
    let message = status.message();
    if status.opacity() < FULL_OPACITY {
        println!("\n\x1b[2m{}\x1b[0m", message);
    } else {
        println!("\n{}", message);
    }
}

fn print_view(model: &ForecastModel) {
    match model.view() {
        ForecastView::Empty => {}
        ForecastView::Placeholder(text) => println!("{}", text),
        ForecastView::Cards(cards) => {
            for card in cards {
                println!("{}\n", card);
            }
        }
    }
}
