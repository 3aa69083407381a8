use cloud_client::secrets::ProcessEnvironment;
use cloud_client::{args, run_app};

fn main() {
    // Parse command-line arguments
    let args = args::args_checks();
    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        std::process::exit(2);
    }

    // SAFETY: only this thread and the client's runtime workers exist. The
    // workers touch the environment only while a request is in flight, and
    // `secret-env --apply` writes after its fetch has returned.
    let mut env = unsafe { ProcessEnvironment::new() };
    if let Err(e) = run_app(&args, &mut env) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
