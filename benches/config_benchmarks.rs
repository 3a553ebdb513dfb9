use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sitecfg::config::{load_config_from_str, to_pyconf, SourceFormat};
use sitecfg::SiteConfig;

const NOTEBOOK_CONF: &str = include_str!("../tests/fixtures/notebook_legacy_conf.py");

fn bench_config_creation(c: &mut Criterion) {
    c.bench_function("config_default", |b| b.iter(SiteConfig::default));
}

fn bench_config_loading(c: &mut Criterion) {
    c.bench_function("config_from_pyconf", |b| {
        b.iter(|| load_config_from_str(black_box(NOTEBOOK_CONF), SourceFormat::Python))
    });

    let config = load_config_from_str(NOTEBOOK_CONF, SourceFormat::Python).unwrap();
    let toml_str = toml::to_string(&config).unwrap();
    c.bench_function("config_from_toml", |b| {
        b.iter(|| load_config_from_str(black_box(&toml_str), SourceFormat::Toml))
    });

    let json_str = serde_json::to_string(&config).unwrap();
    c.bench_function("config_from_json", |b| {
        b.iter(|| load_config_from_str(black_box(&json_str), SourceFormat::Json))
    });
}

fn bench_config_rendering(c: &mut Criterion) {
    let config = load_config_from_str(NOTEBOOK_CONF, SourceFormat::Python).unwrap();

    c.bench_function("config_to_pyconf", |b| b.iter(|| to_pyconf(black_box(&config))));

    c.bench_function("config_generator_settings", |b| {
        b.iter(|| black_box(&config).generator_settings())
    });

    c.bench_function("config_to_toml_pretty", |b| {
        b.iter(|| toml::to_string_pretty(&black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_config_creation,
    bench_config_loading,
    bench_config_rendering
);
criterion_main!(benches);
