use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser;
use hydrate_cli::HydrateCli;
use hydrate_core::AnyEmptyResult;
use hydrate_core::AnyError;
use hydrate_core::HydrateOptions;
use hydrate_core::Hydrator;
use hydrate_core::OsFileSystem;
use hydrate_core::OutputGuard;
use hydrate_core::OutputPermit;
use hydrate_core::config::HydrateConfig;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "HYDRATE_LOG";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HydrateCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = if args.check {
		run_check(&args)
	} else {
		run_hydrate(&args)
	};

	if let Err(e) = result {
		match e.downcast::<hydrate_core::HydrateError>() {
			Ok(hydrate_err) => {
				let report: miette::Report = (*hydrate_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(1);
	}
}

/// Log to stderr. `HYDRATE_LOG` wins over `--verbose`, which wins over the
/// `warn` default.
fn init_tracing(verbose: bool, use_color: bool) {
	let fallback = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color)
				.compact(),
		)
		.try_init()
		.ok();
}

/// Engine options from the config file, with command line flags on top.
fn resolve_options(args: &HydrateCli) -> Result<HydrateOptions, AnyError> {
	let config = match &args.config {
		Some(path) => Some(HydrateConfig::load_file(path)?),
		None => HydrateConfig::load(&std::env::current_dir()?)?,
	};

	let mut options = config
		.as_ref()
		.map(HydrateConfig::options)
		.unwrap_or_default();

	if let Some(max_depth) = args.max_depth {
		options = options.with_max_depth(max_depth);
	}

	tracing::debug!(
		max_depth = options.max_depth,
		from_config = config.is_some(),
		"resolved options"
	);

	Ok(options)
}

fn hydrate_input(args: &HydrateCli) -> Result<(String, &Path), AnyError> {
	let input = args
		.input_path()
		.ok_or("no input file given, pass it as INPUT or with --input")?;
	let options = resolve_options(args)?;
	let hydrated = Hydrator::new(options).hydrate_file(input)?;

	Ok((hydrated, input))
}

fn run_hydrate(args: &HydrateCli) -> AnyEmptyResult {
	let (hydrated, input) = hydrate_input(args)?;

	if args.writes_to_stdout() {
		let mut stdout = std::io::stdout().lock();
		stdout.write_all(hydrated.as_bytes())?;
		stdout.flush()?;
		return Ok(());
	}

	let permit = OutputGuard::new(input).permit(&args.output, &OsFileSystem)?;
	if permit == OutputPermit::InPlace {
		tracing::debug!(path = %args.output.display(), "overwriting input");
	}

	std::fs::write(&args.output, &hydrated)?;

	println!(
		"{} {} -> {}",
		colored!("Hydrated", green),
		input.display(),
		args.output.display()
	);

	Ok(())
}

fn run_check(args: &HydrateCli) -> AnyEmptyResult {
	if args.writes_to_stdout() {
		return Err(
			"`--check` compares against an output file and cannot be used with `--output -`".into(),
		);
	}

	let (hydrated, _) = hydrate_input(args)?;
	let current = match std::fs::read_to_string(&args.output) {
		Ok(content) => content,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
		Err(e) => return Err(e.into()),
	};

	if current == hydrated {
		println!("{} is up to date", args.output.display());
		return Ok(());
	}

	eprintln!(
		"{} {}",
		colored!("Out of date:", bold),
		args.output.display()
	);
	print_diff(&current, &hydrated);

	Err(format!(
		"`{}` does not match the hydrated input",
		args.output.display()
	)
	.into())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
	if !expected.ends_with('\n') || !current.ends_with('\n') {
		eprintln!();
	}
}
