//! Triangulate UFO glyphs and lay out text meshes from the command line.

use meshtext::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::runner::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
