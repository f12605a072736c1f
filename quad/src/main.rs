use anyhow::Context;
use backend::glutils::sample_pixel;
use backend::system::MessageBoxAlert;
use backend::{init_logging, render_once, LoggingConfig, System, SystemConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = SystemConfig::default();
    let Some(system) = System::open(&config, &mut MessageBoxAlert) else {
        // already logged and shown to the user
        return Ok(());
    };

    let mut gl = system.gl();
    gl.log_info();

    render_once(&mut gl, config.profile).context("rendering the quad")?;

    let center = sample_pixel(&mut gl, (system.w / 2) as i32, (system.h / 2) as i32);
    log::debug!("center pixel rgba = {center:?}");

    system.present();
    system.wait_for_close().context("waiting for the window to close")?;
    Ok(())
}
