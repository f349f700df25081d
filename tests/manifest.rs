use std::path::Path;
use webicons::catalog::{IconCatalog, OutputLayout};
use webicons::manifest::{href, html_links, manifest_icons, manifest_json, DEFAULT_HREF_BASE};

#[test]
fn test_href_is_site_absolute() {
    assert_eq!(
        href(
            Path::new("assets/icons"),
            Path::new("assets/icons/pwa/icon-192x192.png")
        ),
        "/assets/icons/pwa/icon-192x192.png"
    );
    assert_eq!(
        href(Path::new("./out"), Path::new("./out/favicon/favicon.ico")),
        "/out/favicon/favicon.ico"
    );
    assert_eq!(
        href(Path::new("."), Path::new("./apple/apple-touch-icon.png")),
        "/apple/apple-touch-icon.png"
    );
}

#[test]
fn test_href_falls_back_for_paths_outside_the_site() {
    assert_eq!(
        href(
            Path::new("../site/icons"),
            Path::new("../site/icons/pwa/icon-512x512.png")
        ),
        format!("{DEFAULT_HREF_BASE}/pwa/icon-512x512.png")
    );

    let absolute = std::env::temp_dir().join("icons");
    assert_eq!(
        href(&absolute, &absolute.join("favicon").join("favicon.ico")),
        "/assets/icons/favicon/favicon.ico"
    );
}

#[test]
fn test_manifest_lists_pwa_icons_with_maskable_purpose() {
    let layout = OutputLayout::from_base("assets/icons");
    let specs = IconCatalog::default().specs(&layout, true);

    let manifest = manifest_icons(Path::new("assets/icons"), &specs);
    let srcs: Vec<&str> = manifest.icons.iter().map(|i| i.src.as_str()).collect();
    assert_eq!(
        srcs,
        vec![
            "/assets/icons/pwa/icon-192x192.png",
            "/assets/icons/pwa/icon-256x256.png",
            "/assets/icons/pwa/icon-384x384.png",
            "/assets/icons/pwa/icon-512x512.png",
            "/assets/icons/pwa/icon-maskable-512x512.png",
        ]
    );

    let json = manifest_json(Path::new("assets/icons"), &specs).unwrap();
    let json: serde_json::Value = serde_json::from_str(&json).unwrap();
    let icons = json["icons"].as_array().expect("icons should be an array");
    assert_eq!(icons.len(), 5);
    assert_eq!(icons[0]["sizes"], "192x192");
    assert_eq!(icons[0]["type"], "image/png");
    assert!(icons[0].get("purpose").is_none());
    assert_eq!(icons[4]["purpose"], "maskable");
}

#[test]
fn test_manifest_without_maskable() {
    let layout = OutputLayout::from_base("assets/icons");
    let specs = IconCatalog::default().specs(&layout, false);

    let manifest = manifest_icons(Path::new("assets/icons"), &specs);
    assert_eq!(manifest.icons.len(), 4);
    assert!(manifest.icons.iter().all(|i| i.purpose.is_none()));
}

#[test]
fn test_html_links() {
    let layout = OutputLayout::from_base("assets/icons");
    let specs = IconCatalog::default().specs(&layout, true);

    assert_eq!(
        html_links(Path::new("assets/icons"), &specs),
        vec![
            r#"<link rel="icon" type="image/png" sizes="16x16" href="/assets/icons/favicon/favicon-16x16.png">"#,
            r#"<link rel="icon" type="image/png" sizes="32x32" href="/assets/icons/favicon/favicon-32x32.png">"#,
            r#"<link rel="icon" href="/assets/icons/favicon/favicon.ico">"#,
            r#"<link rel="apple-touch-icon" sizes="180x180" href="/assets/icons/apple/apple-touch-icon.png">"#,
        ]
    );
}
