use anyhow::Result;
use midisketch::controller::list_input_ports;

fn main() -> Result<()> {
    env_logger::init();

    let ports = list_input_ports()?;
    println!("Available MIDI input ports:");
    for name in &ports {
        println!("{name}");
    }
    if ports.is_empty() {
        log::info!("No MIDI input ports found");
    }
    Ok(())
}
