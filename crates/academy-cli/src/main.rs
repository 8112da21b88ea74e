use academy_cli::{render, AcademyConfig, AppState, View};
use academy_mentor::{GeminiBackend, MentorSession};
use academy_simulator::Strategy;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("academy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("DevOps Academy: lessons, cheat sheets, a strategy simulator and a terminal lab")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("modules").about("List learning modules by category"))
        .subcommand(
            Command::new("module")
                .about("Show a lesson")
                .arg(Arg::new("id").required(true).help("Module id")),
        )
        .subcommand(
            Command::new("cheatsheets")
                .about("Show cheat sheets")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Only commands whose text or description matches"),
                ),
        )
        .subcommand(
            Command::new("glossary")
                .about("Show the glossary")
                .arg(Arg::new("search").long("search").help("Filter terms")),
        )
        .subcommand(
            Command::new("path")
                .about("Show a learning path")
                .arg(Arg::new("id").required(true).help("Learning path id")),
        )
        .subcommand(
            Command::new("survival")
                .about("Show the survival kit, or one category")
                .arg(Arg::new("id").help("Category id")),
        )
        .subcommand(Command::new("pipeline").about("Show the sample pipeline status"))
        .subcommand(
            Command::new("simulate")
                .about("Run the deployment strategy simulator")
                .arg(
                    Arg::new("strategy")
                        .long("strategy")
                        .default_value("rolling")
                        .help("rolling, blue-green or canary"),
                ),
        )
        .subcommand(
            Command::new("lab")
                .about("Open the terminal lab; commands are read from stdin")
                .arg(Arg::new("module").long("module").help("Module id")),
        )
        .subcommand(
            Command::new("mentor")
                .about("Ask the DevOps mentor")
                .arg(
                    Arg::new("question")
                        .required(true)
                        .num_args(1..)
                        .help("Question text"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn optional<'a>(args: &'a ArgMatches, name: &str) -> Option<&'a str> {
    args.get_one::<String>(name).map(String::as_str)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let config = AcademyConfig::load_or_default(
        matches.get_one::<PathBuf>("config").map(PathBuf::as_path),
    )
    .context("loading configuration")?;

    let (name, args) = matches.subcommand().context("no subcommand given")?;

    // The mentor needs no catalogue.
    if name == "mentor" {
        let question = args
            .get_many::<String>("question")
            .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        return ask_mentor(&config, &question).await;
    }

    let catalog = config.catalog().context("loading catalogue")?;
    let mut app = AppState::new(catalog, &config);

    match name {
        "modules" => print!("{}", render::module_index(app.catalog())),
        "module" => {
            app.select_module(required(args, "id")?);
            print!("{}", render::module_page(app.active_module()));
        }
        "cheatsheets" => {
            app.select_view(View::CheatSheet);
            let sheets = app
                .catalog()
                .search_cheat_sheets(optional(args, "search").unwrap_or_default());
            print!("{}", render::cheat_sheets(&sheets));
        }
        "glossary" => {
            app.select_view(View::Glossary);
            let terms = app
                .catalog()
                .search_glossary(optional(args, "search").unwrap_or_default());
            print!("{}", render::glossary(&terms));
        }
        "path" => {
            app.select_path(required(args, "id")?)?;
            if let Some(path) = app.active_path() {
                print!("{}", render::learning_path(&app.catalog().resolve_path(path)));
            }
        }
        "survival" => match optional(args, "id") {
            Some(id) => {
                app.select_survival(id)?;
                if let Some(category) = app.active_survival() {
                    print!("{}", render::survival_category(category));
                }
            }
            None => print!("{}", render::survival_index(app.catalog().survival_kit())),
        },
        "pipeline" => print!("{}", academy_catalog::sample_pipeline().render()),
        "simulate" => {
            let strategy: Strategy = required(args, "strategy")?.parse()?;
            simulate(&mut app, strategy).await?;
        }
        "lab" => {
            if let Some(id) = optional(args, "module") {
                app.select_module(id);
            }
            run_lab(&mut app).await?;
        }
        other => anyhow::bail!("unknown subcommand: {other}"),
    }

    Ok(())
}

async fn simulate(app: &mut AppState, strategy: Strategy) -> Result<()> {
    app.select_view(View::Simulator);
    let simulator = app
        .simulator()
        .context("simulator not mounted on the simulator view")?;
    simulator.select_strategy(strategy)?;

    let mut updates = simulator.subscribe();
    simulator.start();
    loop {
        let snapshot = updates.borrow_and_update().clone();
        println!("{}", render::simulator_frame(&snapshot));
        if !snapshot.running {
            break;
        }
        updates
            .changed()
            .await
            .context("simulator stopped publishing")?;
    }
    Ok(())
}

async fn run_lab(app: &mut AppState) -> Result<()> {
    let session = app.open_lab();
    let mut printed = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let entries = session.settled().await.entries;
        if entries.len() < printed {
            printed = 0;
        }
        print!("{}", render::transcript(&entries[printed..]));
        printed = entries.len();

        let Some(line) = lines.next_line().await.context("reading lab input")? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        session.submit(&line);
    }

    app.close_lab();
    Ok(())
}

async fn ask_mentor(config: &AcademyConfig, question: &str) -> Result<()> {
    let backend = GeminiBackend::from_env(config.mentor.clone())
        .context("configuring the mentor backend")?;
    let session = MentorSession::new(backend);
    match session.ask(question).await {
        Some(reply) => println!("{reply}"),
        None => anyhow::bail!("empty question"),
    }
    Ok(())
}
