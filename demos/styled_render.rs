use std::error::Error;

use qrstyle::{
    content::{Content, Wifi},
    png_to_jpeg, Design, RenderConfig, Renderer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let design = Design::from_json(
        r##"{
            "background": { "color": "#fdf6e3" },
            "dots": { "style": "classy", "color": "#073642" },
            "cornersSquare": { "style": "leaf-top-left", "color": "#268bd2" },
            "cornersDot": { "style": "diamond", "color": "#dc322f" },
            "imageOptions": { "imageSize": 0.2, "hideBackgroundDots": true }
        }"##,
    );
    let wifi = Content::Wifi(Wifi {
        ssid: "CoffeeShop".into(),
        encryption: "WPA".into(),
        password: "espresso".into(),
    });

    let renderer = Renderer::new(RenderConfig::preview());
    let png = renderer.generate(&wifi.payload(), &design).await?;
    std::fs::write("styled_qr.png", &png)?;
    std::fs::write("styled_qr.jpg", png_to_jpeg(&png, 95)?)?;
    println!("Wrote styled_qr.png and styled_qr.jpg");
    Ok(())
}
