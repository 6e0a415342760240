use gridmaze::{
    app::{App, AppError, AppOptions},
    logging,
    settings::Settings,
    ui::MazeView,
};
use gridmaze_core::{dims::Dims, solve_maze, GenAlgorithm};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "gridmaze")]
struct Args {
    #[clap(long, help = "Maze width in cells, overrides the preset")]
    width: Option<i32>,
    #[clap(long, help = "Maze height in cells, overrides the preset")]
    height: Option<i32>,
    #[clap(short, long, help = "Size preset title or number, e.g. Large or 3")]
    preset: Option<String>,
    #[clap(short, long, help = "Generation algorithm: dfs or prims")]
    algorithm: Option<GenAlgorithm>,
    #[clap(long, help = "Seed of the first maze")]
    seed: Option<u64>,
    #[clap(long, action, help = "Print one maze to stdout and quit")]
    print: bool,
    #[clap(long, action, help = "Include the solution when printing")]
    solution: bool,
    #[clap(short, long, action, help = "Show debug messages")]
    verbose: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn find_preset(settings: &Settings, query: &str) -> Result<usize, AppError> {
    let presets = settings.get_mazes();

    if let Ok(number) = query.parse::<usize>() {
        if (1..=presets.len()).contains(&number) {
            return Ok(number - 1);
        }
    }

    presets
        .iter()
        .position(|p| p.title.eq_ignore_ascii_case(query))
        .ok_or_else(|| AppError::UnknownPreset(query.to_string()))
}

fn options(args: &Args, settings: &Settings) -> Result<AppOptions, AppError> {
    let preset = match &args.preset {
        Some(query) => find_preset(settings, query)?,
        None => settings.get_default_preset(),
    };

    let mut options = AppOptions {
        presets: settings.get_mazes(),
        preset,
        custom_size: None,
        algorithm: args.algorithm.unwrap_or(settings.get_default_algorithm()),
        move_mode: settings.get_move_mode(),
        seed: args.seed.or(settings.get_seed()),
    };

    if args.width.is_some() || args.height.is_some() {
        let Dims(w, h) = options.selected_size();
        options.custom_size = Some(Dims(args.width.unwrap_or(w), args.height.unwrap_or(h)));
    }

    Ok(options)
}

fn print_maze(mut options: AppOptions, with_solution: bool) -> Result<(), AppError> {
    let maze = options.generate()?;
    let path = if with_solution {
        Some(solve_maze(&maze)?)
    } else {
        None
    };

    let mut view = MazeView::new(&maze);
    if let Some(path) = &path {
        view = view.solution(path);
    }

    for line in view.lines() {
        println!("{}", line);
    }
    if let Some(path) = &path {
        println!("Solution: {} steps", path.len() - 1);
    }

    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    logging::init(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Warn
    });

    let settings_path = Settings::default_path();

    if args.reset_config {
        match &settings_path {
            Some(path) => Settings::reset_config(path)?,
            None => eprintln!("No config directory available"),
        }
        return Ok(());
    }

    if args.show_config_path {
        match &settings_path {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("No config directory available"),
        }
        return Ok(());
    }

    let settings = Settings::load_or_default(settings_path.as_deref());

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    let options = options(&args, &settings)?;

    if args.print {
        let res = print_maze(options, args.solution);
        for msg in logging::get_logger().drain() {
            eprintln!("{}", msg.format());
        }
        return res;
    }

    better_panic::install();

    App::new(options)?.run()
}
