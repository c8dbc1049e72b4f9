//! End-to-end tests for pattern matching models
//!
//! These tests drive the public API only: build a model, register entities
//! and intents, match user input and check the ranked results.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use pattern_intent_config::{init_tracing, MatcherSettings, ModelDefinition, ObservabilityConfig};
use pattern_intent_matcher::{
    Entity, EntityMatchMode, EntityType, MatcherError, PatternError, PatternMatchingModel,
};
use pattern_intent_numbers::NumberParserRegistry;

fn registry() -> Arc<NumberParserRegistry> {
    Arc::new(NumberParserRegistry::new())
}

fn home_model() -> PatternMatchingModel {
    let model = PatternMatchingModel::new("en-US", registry());
    model
        .add_entity(Entity::list(
            "device",
            EntityMatchMode::Basic,
            ["living room light", "fan"],
        ))
        .unwrap();
    model.add_intent("turnOn", ["turn on [the] {device}"]).unwrap();
    model.add_intent("turnOff", ["turn off [the] {device}"]).unwrap();
    model
}

#[test]
fn test_turn_on_living_room_light() {
    let _ = init_tracing(&ObservabilityConfig {
        log_level: "trace".to_string(),
        log_json: false,
    });

    let model = home_model();
    let best = model.best_match("Turn on the living room light").unwrap();
    assert_eq!(best.intent_id, "turnOn");
    assert_eq!(best.pattern, "turn on [the] {device}");
    assert_eq!(best.entity_value("device"), Some("living room light"));
    assert_eq!(best.entities["device"].entity_type, EntityType::List);

    let best = model.best_match("turn off fan.").unwrap();
    assert_eq!(best.intent_id, "turnOff");
    assert_eq!(best.entity_value("device"), Some("fan"));
}

#[test]
fn test_greedy_free_text() {
    let model = PatternMatchingModel::new("en-US", registry());
    model.add_intent("open", ["open {app} please"]).unwrap();

    let results = model.find_matches("Open Microsoft Word, please!");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_value("app"), Some("microsoft word"));
    assert_eq!(results[0].entities["app"].entity_type, EntityType::Any);
}

#[test]
fn test_optional_and_required_groups() {
    let model = PatternMatchingModel::new("en-US", registry());
    model
        .add_intent("music", ["(play|start) [the|some] music"])
        .unwrap();

    for input in ["play music", "start the music", "Play some music"] {
        assert!(model.best_match(input).is_some(), "{input}");
    }
    assert!(model.best_match("the music").is_none());
    assert!(model.best_match("play thee music").is_none());
}

#[test]
fn test_exact_match_outranks_captures() {
    let model = PatternMatchingModel::new("en-US", registry());
    model.add_intent("generic", ["call {contact} {phone}"]).unwrap();
    model.add_intent("home", ["call mom at home"]).unwrap();

    let results = model.find_matches("call mom at home");
    assert_eq!(results.len(), 2);

    let best = model.best_match("call mom at home").unwrap();
    assert_eq!(best.intent_id, "home");
    assert!(best.entities.is_empty());
    assert_eq!(best.bytes_matched, 13);
}

#[test]
fn test_integer_entity_outranks_free_text() {
    let model = PatternMatchingModel::new("en-US", registry());
    model.add_entity(Entity::prebuilt_integer("count")).unwrap();
    model.add_intent("order", ["order {count} pizzas"]).unwrap();
    model.add_intent("orderAnything", ["order {item} pizzas"]).unwrap();

    let best = model.best_match("order twenty five pizzas").unwrap();
    assert_eq!(best.intent_id, "order");
    assert_eq!(best.entity_value("count"), Some("25"));

    let best = model.best_match("order pepperoni pizzas").unwrap();
    assert_eq!(best.intent_id, "orderAnything");
}

#[test]
fn test_invalid_phrase_rejects_registration() {
    let model = PatternMatchingModel::new("en-US", registry());
    let err = model
        .add_intent("book", ["book a flight", "book {flight"])
        .unwrap_err();
    assert!(matches!(
        err,
        MatcherError::Pattern(PatternError::UnclosedEntity { .. })
    ));
    assert!(err.to_string().contains("book {flight"));
    assert!(model.intent("book").is_none());
    assert!(model.best_match("book a flight").is_none());
}

#[test]
fn test_repeated_registration_is_idempotent() {
    let model = home_model();
    model.add_intent("turnOn", ["turn on [the] {device}"]).unwrap();
    model.add_intent("turnOn", ["Turn on  [the] {device}!"]).unwrap();
    assert_eq!(model.intent("turnOn").unwrap().patterns().len(), 1);
    assert_eq!(model.find_matches("turn on the fan").len(), 1);
}

#[test]
fn test_concurrent_registration_and_matching() {
    let model = Arc::new(home_model());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                model
                    .add_intent(&format!("scene{n}"), [format!("activate scene {n}")])
                    .unwrap();
                for _ in 0..20 {
                    let best = model.best_match("turn on the fan").unwrap();
                    assert_eq!(best.intent_id, "turnOn");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(model.intent_ids().len(), 6);
    assert_eq!(model.best_match("activate scene 3").unwrap().intent_id, "scene3");
}

#[test]
fn test_model_from_yaml_definition() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(
        br#"
language: es-ES
intents:
  - id: temporizador
    phrases:
      - "pon [un] temporizador de {minutos} minutos"
entities:
  - name: minutos
    kind: prebuilt_integer
"#,
    )
    .unwrap();

    let settings = MatcherSettings {
        definition_path: Some(file.path().display().to_string()),
        ..MatcherSettings::default()
    };
    let model = PatternMatchingModel::from_settings(&settings, registry()).unwrap();
    assert_eq!(model.intent_ids(), vec!["temporizador"]);
    assert_eq!(model.entity_names(), vec!["minutos"]);

    let best = model
        .best_match("Pon un temporizador de cuarenta y dos minutos")
        .unwrap();
    assert_eq!(best.entity_value("minutos"), Some("42"));
}

#[test]
fn test_missing_definition_file() {
    let settings = MatcherSettings {
        definition_path: Some("/nonexistent/model.yaml".to_string()),
        ..MatcherSettings::default()
    };
    assert!(matches!(
        PatternMatchingModel::from_settings(&settings, registry()),
        Err(MatcherError::Definition(_))
    ));
}

#[test]
fn test_french_spoken_number() {
    let definition = ModelDefinition::from_yaml_str(
        r#"
language: fr-FR
intents:
  - id: minuteur
    phrases: ["mets un minuteur de {n} minutes"]
entities:
  - name: n
    kind: prebuilt_integer
"#,
    )
    .unwrap();
    let model = PatternMatchingModel::from_definition(&definition, registry()).unwrap();

    let best = model
        .best_match("Mets un minuteur de quatre-vingt-douze minutes")
        .unwrap();
    assert_eq!(best.entity_value("n"), Some("92"));
    assert!(model.best_match("mets un minuteur de plusieurs minutes").is_none());
}

#[test]
fn test_chinese_and_japanese() {
    let zh = PatternMatchingModel::new("zh-CN", registry());
    zh.add_intent("open", ["打开{app}"]).unwrap();
    let best = zh.best_match("打开微信。").unwrap();
    assert_eq!(best.entity_value("app"), Some("微信"));

    let ja = PatternMatchingModel::new("ja-JP", registry());
    ja.add_entity(Entity::prebuilt_integer("数")).unwrap();
    ja.add_intent("order", ["{数}個ください"]).unwrap();
    let best = ja.best_match("千三個ください").unwrap();
    assert_eq!(best.entity_value("数"), Some("1003"));
}

#[test]
fn test_literal_bytes_matched() {
    let model = PatternMatchingModel::new("en-US", registry());
    model.add_intent("time", ["what time is it"]).unwrap();
    let best = model.best_match("What time is it?").unwrap();
    assert_eq!(best.bytes_matched, 12);
    assert!(best.entities.is_empty());
}

#[test]
fn test_bundled_home_model() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/models/home.en.yaml");
    let definition = ModelDefinition::from_path(path).unwrap();
    let model = PatternMatchingModel::from_definition(&definition, registry()).unwrap();

    let best = model.best_match("Switch off the kitchen light").unwrap();
    assert_eq!(best.intent_id, "turnOff");
    assert_eq!(best.entity_value("device"), Some("kitchen light"));

    let best = model.best_match("set a timer for twenty minutes").unwrap();
    assert_eq!(best.intent_id, "setTimer");
    assert_eq!(best.entity_value("minutes"), Some("20"));

    let best = model.best_match("launch spotify").unwrap();
    assert_eq!(best.entity_value("app"), Some("spotify"));
}
