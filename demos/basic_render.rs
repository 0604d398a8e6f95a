use std::error::Error;

use qrstyle::{Design, ECLevel, ModuleMatrix, Renderer};

fn main() -> Result<(), Box<dyn Error>> {
    let matrix = ModuleMatrix::encode(b"https://example.com", ECLevel::H)?;
    let png = Renderer::default().render_with_logo(&matrix, &Design::default(), None)?;
    std::fs::write("basic_qr.png", &png)?;
    println!("Wrote basic_qr.png ({} bytes, {}x{} modules)", png.len(), matrix.width(), matrix.width());
    Ok(())
}
