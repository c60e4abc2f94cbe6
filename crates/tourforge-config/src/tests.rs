//! Tests for run configuration.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        start_city = "City1"
        random_seed = 42

        [genetic]
        population_size = 50
        generations = 1000
        mutation_rate = 0.2

        [progress]
        poll_interval_ms = 250

        [activation]
        random_count = 6
        cities = ["City2", "City3"]
    "#;

    let config = TourConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.start_city.as_deref(), Some("City1"));
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.genetic.population_size, 50);
    assert_eq!(config.genetic.generations, 1000);
    assert_eq!(config.genetic.mutation_rate, 0.2);
    assert_eq!(config.progress.poll_interval(), Duration::from_millis(250));
    assert_eq!(config.activation.random_count, Some(6));
    assert_eq!(config.activation.cities, vec!["City2", "City3"]);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        start_city: City1
        random_seed: 42
        genetic:
          population_size: 50
        activation:
          cities: [City4]
    "#;

    let config = TourConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.start_city.as_deref(), Some("City1"));
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.genetic.population_size, 50);
    assert_eq!(config.genetic.generations, 100);
    assert_eq!(config.activation.cities, vec!["City4"]);
}

#[test]
fn test_defaults() {
    let config = TourConfig::from_toml_str("").unwrap();
    assert_eq!(config, TourConfig::default());
    assert_eq!(config.start_city, None);
    assert_eq!(config.genetic.population_size, 100);
    assert_eq!(config.genetic.generations, 100);
    assert_eq!(config.genetic.mutation_rate, 0.01);
    assert_eq!(config.progress.poll_interval_ms, 100);
    assert_eq!(config.activation.random_count, None);
    assert!(config.activation.cities.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = TourConfig::new()
        .with_start_city("City1")
        .with_random_seed(123)
        .with_poll_interval_ms(50)
        .with_random_activation(4)
        .with_active_city("City7")
        .with_genetic(GeneticConfig {
            population_size: 10,
            generations: 20,
            mutation_rate: 0.5,
        });

    assert_eq!(config.start_city.as_deref(), Some("City1"));
    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.progress.poll_interval_ms, 50);
    assert_eq!(config.activation.random_count, Some(4));
    assert_eq!(config.activation.cities, vec!["City7"]);
    assert_eq!(config.genetic.generations, 20);
}

#[test]
fn test_validate_rejects_out_of_range_values() {
    let bad_population = TourConfig::new().with_genetic(GeneticConfig {
        population_size: 1,
        ..GeneticConfig::default()
    });
    assert!(matches!(
        bad_population.validate(),
        Err(ConfigError::Invalid(_))
    ));

    let bad_generations = TourConfig::new().with_genetic(GeneticConfig {
        generations: -1,
        ..GeneticConfig::default()
    });
    assert!(bad_generations.validate().is_err());

    let bad_rate = TourConfig::new().with_genetic(GeneticConfig {
        mutation_rate: 1.1,
        ..GeneticConfig::default()
    });
    assert!(bad_rate.validate().is_err());

    let nan_rate = TourConfig::new().with_genetic(GeneticConfig {
        mutation_rate: f64::NAN,
        ..GeneticConfig::default()
    });
    assert!(nan_rate.validate().is_err());

    assert!(TourConfig::new().with_poll_interval_ms(0).validate().is_err());
    assert!(TourConfig::new().with_random_activation(0).validate().is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "start_city = \"City5\"").unwrap();

    let config = TourConfig::load(file.path()).unwrap();
    assert_eq!(config.start_city.as_deref(), Some("City5"));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let result = TourConfig::load("/nonexistent/tour.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
    assert_eq!(result.unwrap_or_default(), TourConfig::default());
}

#[test]
fn test_malformed_toml() {
    let result = TourConfig::from_toml_str("[genetic]\npopulation_size = \"many\"");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
