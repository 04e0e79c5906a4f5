use anyhow::{Context, Result};
use surface_negotiator::{
    glfw_window::GlfwWindow,
    logging,
    vulkan::{Session, SessionConfig},
};

fn main() -> Result<()> {
    let logger = logging::setup()?;
    if let Err(err) = run() {
        log::error!("{:?}", err);
        drop(logger);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let config = SessionConfig::default();
    let mut window =
        GlfwWindow::new(&config).context("unable to create the window")?;

    // the session is dropped before the window it presents to
    let mut session = Session::new(&window, &config)
        .context("unable to negotiate a presentation chain")?;
    session.run_until(|| window.poll());
    session.shutdown();

    Ok(())
}
