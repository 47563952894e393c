use bepsync::cli;
use bepsync::logging;

fn main() {
	logging::init_tracing();

	let matches = cli::command().get_matches();
	if let Err(err) = cli::run(&matches) {
		eprintln!("bepsync: {}", err);
		std::process::exit(err.exit_code());
	}
}

// vim: ts=4
