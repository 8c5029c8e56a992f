use std::process::ExitCode;

use bpaf::{construct, pure, short, Parser};
use ctt::{
	common::Level,
	frontend::{
		elaborate::elaborate,
		evaluate::Evaluate as _,
		parse::parse,
		unparse::{pretty_print, pretty_print_value},
	},
	report::report_diagnostic,
	server::serve,
};

pub fn check(source: &str) -> ExitCode {
	let (expression, resolver, parse_diagnostics) = parse(source);
	let (term, ty, elaboration_diagnostics) = elaborate(&resolver, expression, None);

	if !parse_diagnostics.is_empty() || !elaboration_diagnostics.is_empty() {
		for diagnostic in parse_diagnostics.into_iter().chain(elaboration_diagnostics) {
			report_diagnostic(source, &diagnostic);
		}
		return ExitCode::FAILURE;
	}

	println!("Elaborated term: {}", pretty_print(&term, &resolver));
	// The synthesized type may mention a binding whose scope has already ended, so it renders
	// from the value directly rather than through unevaluation.
	println!("Synthesized type: {}", pretty_print_value(&ty, &resolver, Level(0)));
	println!("Evaluation: {}", pretty_print_value(&term.evaluate(), &resolver, Level(0)));
	ExitCode::SUCCESS
}

#[derive(Clone)]
enum InputOption {
	Direct(String),
	FilePath(String),
}

#[derive(Clone)]
enum Command {
	Check { input: InputOption },
	Lsp,
}

fn main() -> ExitCode {
	let check_command = construct!(Command::Check {
		input(construct!([
			c(short('c')
				.argument::<String>("\"expression\"")
				.help("Read input from argument")
				.map(InputOption::Direct)),
			f(short('f').argument::<String>("PATH").help("Read input from file").map(InputOption::FilePath)),
		]))
	})
	.to_options()
	.descr("Elaborate and evaluate an expression")
	.command("check");
	let lsp_command =
		pure(Command::Lsp).to_options().descr("Start the language server").command("lsp");

	match construct!([check_command, lsp_command]).to_options().run() {
		Command::Check { input } => {
			let source = match input {
				InputOption::Direct(expression) => expression,
				InputOption::FilePath(file_path) => std::fs::read_to_string(file_path).unwrap(),
			};
			check(&source)
		}
		Command::Lsp => match serve() {
			Ok(()) => ExitCode::SUCCESS,
			Err(error) => {
				eprintln!("error: {error}");
				ExitCode::FAILURE
			}
		},
	}
}
