//! Demo - render the built-in sample delivery note
//!
//! Run with: cargo run --example demo_note -p delivery-note

use delivery_note::DeliveryRequest;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut request = DeliveryRequest::sample();
    request.output_path = "output/demo_delivery_note.pdf".into();

    let path = delivery_note::generate(&request)?;
    println!("Demonstration PDF created: {}", path.display());

    Ok(())
}
