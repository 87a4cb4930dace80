use std::process::ExitCode;

fn main() -> ExitCode {
    match cmdtree::cli::run() {
        Ok(code) => code,
        Err(err) => {
            cmdtree::ui::output::error(format!("{:#}", err));
            ExitCode::from(2)
        }
    }
}
