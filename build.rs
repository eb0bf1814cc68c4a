use std::env;
use std::fs;
use std::io;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%APP_NAME%</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 560px; margin: 96px auto; text-align: center; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>%APP_NAME%</h1>
    <p>The admin pages are not embedded in this build. The JSON API under <code>/api</code> is available.</p>
    <p><code>cd frontend &amp;&amp; npm install &amp;&amp; npm run build</code></p>
</body>
</html>"#;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let dist = Path::new(&manifest_dir).join("frontend/dist");
    if dist.exists() {
        return;
    }

    println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
    if let Err(e) = write_placeholder(&dist) {
        println!("cargo:warning=failed to write placeholder frontend: {e}");
    }
}

// rust-embed 要求目录存在
fn write_placeholder(dist: &Path) -> io::Result<()> {
    fs::create_dir_all(dist.join("assets"))?;
    fs::write(dist.join("index.html"), PLACEHOLDER_INDEX)?;
    fs::write(dist.join("favicon.ico"), [])
}
