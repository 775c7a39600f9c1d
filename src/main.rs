// Main entry point that forwards to the shaderport-app library
fn main() {
    // Exit non-zero on any failure
    std::process::exit(match shaderport_app::main() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    });
}
