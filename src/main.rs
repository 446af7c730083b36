use clap::{crate_version, App, Arg, ArgMatches};
use edit_session::{
    config::Config, logger::SessionLogger, script::Script, AppError, AppResult, SessionState,
    Store,
};
use log::*;
use std::path::Path;
use std::process;

fn main() {
    let matches = App::new("edit-session")
        .version(crate_version!())
        .about("Replays edit-session scripts against a seeded employee collection")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("script")
                .short("s")
                .long("script")
                .value_name("FILE")
                .help("YAML action script to replay")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every dispatch"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> AppResult<()> {
    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        config.level_filter()?
    };
    let logger = SessionLogger::new(level);
    logger.set_log_callback(Box::new(|line: String| eprintln!("{}", line)));
    logger
        .install()
        .map_err(|e| AppError::Logger(e.to_string()))?;

    info!("Starting session with {} employees...", config.employees.len());
    let store = Store::new(config.initial_state()?);
    let subscription = store.subscribe(|state| {
        println!("{}", summarize(state));
        Ok(())
    });

    println!("{}", summarize(&store.get_state()));
    if let Some(path) = matches.value_of("script") {
        let script = Script::from_file(Path::new(path))?;
        script.run(&store)?;
    }
    subscription.unsubscribe();

    for employee in store.get_state().records() {
        println!(
            "  #{} {} <{}> {} / {}",
            employee.id, employee.name, employee.email, employee.department, employee.position
        );
    }
    info!("Exiting session...");
    Ok(())
}

fn summarize(state: &SessionState) -> String {
    let current = match state.current_record() {
        Some(employee) => format!(" current=#{}", employee.id),
        None => String::new(),
    };
    format!(
        "[{}] records={}{} can_add={} can_edit={} last_action={:?}",
        state.mode(),
        state.records().len(),
        current,
        state.can_add(),
        state.can_edit(),
        state.last_action()
    )
}
