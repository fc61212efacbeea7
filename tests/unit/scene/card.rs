use super::*;

const DOC: &str = r##"{
  "background": { "source": "./img\\bg.png", "zoom": 400, "offset_x": -12.5 },
  "items": [
    { "slot": "title", "value": "Card", "is_title": true },
    { "slot": "name", "label": "Name", "value": "Mio", "color": "#ff0000" },
    { "slot": "free", "label": "Free", "value": "hi", "font_size": 20 }
  ],
  "theme": "opaque",
  "fonts": { "regular": "fonts/a.ttf" }
}"##;

#[test]
fn parses_document_with_kind_defaults() {
    let card = Card::from_reader(DOC.as_bytes()).unwrap();
    card.validate().unwrap();
    assert_eq!(card.theme, ThemePreset::Opaque);

    let items = card.item_map();
    let ids: Vec<&str> = items.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["title", "name", "free"]);

    let title = items.get("title").unwrap();
    assert!(title.is_title);
    assert_eq!(title.font_size, DEFAULT_TITLE_FONT_SIZE);
    assert_eq!(title.color, DEFAULT_TITLE_COLOR);

    let name = items.get("name").unwrap();
    assert_eq!(name.font_size, DEFAULT_VALUE_FONT_SIZE);
    assert_eq!(name.color, Rgba8::rgb(255, 0, 0));
    assert_eq!(items.get("free").unwrap().font_size, 20.0);
}

#[test]
fn background_zoom_is_clamped_and_pan_kept() {
    let card = Card::from_reader(DOC.as_bytes()).unwrap();
    let t = card.background_transform();
    assert_eq!(t.zoom, 250.0);
    assert_eq!(t.offset_x, -12.5);
    assert_eq!(t.offset_y, 0.0);
    assert_eq!(Card::template().background_transform(), BackgroundTransform::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Card::from_reader(r#"{"items": [], "colour": 1}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, CardError::Serde(_)));
}

#[test]
fn validate_rejects_bad_items() {
    let dup = r#"{"items": [{"slot": "a"}, {"slot": "a"}]}"#;
    let card = Card::from_reader(dup.as_bytes()).unwrap();
    assert!(card.validate().unwrap_err().to_string().contains("duplicate"));

    let size = r#"{"items": [{"slot": "a", "font_size": 0}]}"#;
    let card = Card::from_reader(size.as_bytes()).unwrap();
    assert!(card.validate().unwrap_err().to_string().contains("font_size"));

    let empty = r#"{"items": [{"slot": " "}]}"#;
    assert!(Card::from_reader(empty.as_bytes()).unwrap().validate().is_err());
}

#[test]
fn validate_rejects_escaping_asset_paths() {
    let doc = r#"{"items": [], "background": {"source": "../secret.png"}}"#;
    assert!(Card::from_reader(doc.as_bytes()).unwrap().validate().is_err());
    let doc = r#"{"items": [], "fonts": {"regular": "/etc/font.ttf"}}"#;
    assert!(Card::from_reader(doc.as_bytes()).unwrap().validate().is_err());
}

#[test]
fn custom_layout_is_validated() {
    let ok = r#"{"items": [], "layout": [{"id": "a", "x": 0, "y": 0, "w": 10, "h": 10}]}"#;
    let card = Card::from_reader(ok.as_bytes()).unwrap();
    card.validate().unwrap();
    assert_eq!(card.layout_registry().unwrap().len(), 1);

    let bad = r#"{"items": [], "layout": [{"id": "a", "x": 1195, "y": 0, "w": 10, "h": 10}]}"#;
    assert!(Card::from_reader(bad.as_bytes()).unwrap().validate().is_err());
}

#[test]
fn template_matches_standard_layout_and_items() {
    let card = Card::template();
    card.validate().unwrap();
    assert_eq!(card.item_map(), ItemMap::template());
    assert_eq!(card.layout_registry().unwrap(), LayoutRegistry::standard());

    let json = card.to_json_pretty().unwrap();
    let back = Card::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, card);
}

#[test]
fn normalizes_relative_paths() {
    assert_eq!(normalize_rel_path("./a\\b/./c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("C:\\x.png").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("./").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn asset_paths_resolve_against_base_dir() {
    let card = Card::from_reader(DOC.as_bytes())
        .unwrap()
        .with_base_dir("cards");
    assert_eq!(
        card.resolve_path("./img\\bg.png").unwrap(),
        Path::new("cards").join("img/bg.png")
    );
}

#[test]
fn missing_background_file_is_an_error() {
    let card = Card::from_reader(DOC.as_bytes())
        .unwrap()
        .with_base_dir("does-not-exist");
    assert!(card.load_background().is_err());
    assert!(Card::template().load_background().unwrap().image().is_none());
    assert!(Card::template().load_fonts().unwrap().is_none());
}
