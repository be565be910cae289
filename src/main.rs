// Rust Data Explorer - Main executable
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;
use serde_json::Value as JsonValue;

use rust_data_explorer::{
    client::{ExecutionBackend, HttpBackend},
    forms,
    query::{FilterOperator, SortDirection, SortSpec},
    schema::ModelCatalog,
    session::ExplorerSession,
    utils::{init_logging, Config},
};

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = App::new("Rust Data Explorer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("A schema-driven data exploration engine")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Overrides the backend base URL")
                .takes_value(true),
        )
        .subcommand(App::new("models").about("List the models the backend exposes"))
        .subcommand(
            App::new("query")
                .about("Query a model")
                .arg(Arg::new("model").required(true).index(1))
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("FIELD:OP:VALUE")
                        .help("Adds a filter leaf (operator: equals, contains, startswith, endswith, gt, lt, gte, lte)")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .number_of_values(1),
                )
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .value_name("TERM")
                        .help("Searches across all text fields")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("search-column")
                        .long("search-column")
                        .value_name("FIELD")
                        .help("Restricts the search term to one column")
                        .takes_value(true)
                        .requires("search"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_name("FIELD[:DIRECTION]")
                        .help("Sorts by a field, ascending unless :desc is given")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("group-by")
                        .short('g')
                        .long("group-by")
                        .value_name("FIELD")
                        .help("Groups rows by a field and reports counts")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("fields")
                        .long("fields")
                        .value_name("FIELDS")
                        .help("Comma-separated field projection")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("PAGE")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_name("SIZE")
                        .help("Rows per page: 10, 25, 50 or 100")
                        .takes_value(true),
                ),
        )
        .subcommand(
            App::new("create")
                .about("Create a record")
                .arg(Arg::new("model").required(true).index(1))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .value_name("FIELD=VALUE")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .number_of_values(1)
                        .required(true),
                ),
        )
        .subcommand(
            App::new("update")
                .about("Update a record")
                .arg(Arg::new("model").required(true).index(1))
                .arg(
                    Arg::new("id")
                        .long("id")
                        .value_name("ID")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .value_name("FIELD=VALUE")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .number_of_values(1)
                        .required(true),
                ),
        )
        .subcommand(
            App::new("delete")
                .about("Delete a record")
                .arg(Arg::new("model").required(true).index(1))
                .arg(
                    Arg::new("id")
                        .long("id")
                        .value_name("ID")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .get_matches();

    // Load configuration
    let mut config = if let Some(config_path) = matches.value_of("config") {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(url) = matches.value_of("url") {
        config.backend.base_url = url.to_string();
    }

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let backend = HttpBackend::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    );

    // Handle subcommands
    match matches.subcommand() {
        Some(("models", _)) => run_models(&backend),
        Some(("query", sub)) => run_query(&backend, &config, sub),
        Some(("create", sub)) => run_create(&backend, sub),
        Some(("update", sub)) => run_update(&backend, sub),
        Some(("delete", sub)) => run_delete(&backend, sub),
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn run_models(backend: &HttpBackend) -> Result<()> {
    let models = backend.fetch_models()?;

    for model in &models {
        println!(
            "{} (table: {}, primary key: {})",
            model.name, model.table, model.primary_key
        );
        for field in &model.fields {
            println!("  {} {} [{:?}]", field.name, field.declared_type, field.category);
        }
    }

    Ok(())
}

fn run_query(backend: &HttpBackend, config: &Config, sub: &ArgMatches) -> Result<()> {
    let model = sub.value_of("model").unwrap();

    let catalog = ModelCatalog::new(backend.fetch_models()?);
    let mut session = ExplorerSession::new(catalog, config.query.page_size);
    session.select_model(model)?;

    if let Some(size) = sub.value_of("page-size") {
        let size: u32 = size.parse().context("page size must be a number")?;
        session.set_page_size(size)?;
    }

    if let Some(values) = sub.values_of("filter") {
        for spec in values {
            let (field, op, value) = parse_filter_spec(spec)?;
            session.add_filter(&field, op, &value)?;
        }
    }

    match (sub.value_of("search"), sub.value_of("search-column")) {
        (Some(term), Some(column)) => session.set_column_search(column, term)?,
        (Some(term), None) => session.set_global_search(term)?,
        _ => {}
    }

    if let Some(spec) = sub.value_of("sort") {
        session.set_sort(Some(parse_sort_spec(spec)?))?;
    }

    if let Some(field) = sub.value_of("group-by") {
        session.set_group_by(Some(field))?;
    }

    if let Some(fields) = sub.value_of("fields") {
        let projection: Vec<String> = fields.split(',').map(|f| f.trim().to_string()).collect();
        session.set_fields(Some(projection))?;
    }

    // First round trip establishes the total row count
    let (seq, descriptor) = session.next_request()?;
    info!("executing query for model '{}'", model);
    let response = backend.execute(&descriptor)?;
    session.apply_response(seq, &response);

    // Navigate once the window is known
    if let Some(page) = sub.value_of("page") {
        let page: u32 = page.parse().context("page must be a number")?;
        if page > 1 {
            session.set_page(page)?;
            let on_target = session
                .state()
                .map(|s| s.window.page() == page)
                .unwrap_or(false);
            if !on_target {
                bail!("page {} is out of range", page);
            }
            let (seq, descriptor) = session.next_request()?;
            let response = backend.execute(&descriptor)?;
            session.apply_response(seq, &response);
        }
    }

    if let Some(message) = session.error() {
        bail!("query failed: {}", message);
    }

    for row in session.rows() {
        println!("{}", serde_json::to_string(row)?);
    }

    if let Some(state) = session.state() {
        info!(
            "page {} of {} ({} rows known)",
            state.window.page(),
            state.window.total_pages().max(1),
            state.window.total_count()
        );
    }

    Ok(())
}

fn run_create(backend: &HttpBackend, sub: &ArgMatches) -> Result<()> {
    let model_name = sub.value_of("model").unwrap();
    let form = parse_assignments(sub)?;

    let catalog = ModelCatalog::new(backend.fetch_models()?);
    let model = catalog
        .get(model_name)
        .ok_or_else(|| anyhow!("unknown model: {}", model_name))?;

    let record = forms::build_create(model, &form);
    backend.create_record(model_name, &record)?;

    println!("Record created.");
    Ok(())
}

fn run_update(backend: &HttpBackend, sub: &ArgMatches) -> Result<()> {
    let model_name = sub.value_of("model").unwrap();
    let id = parse_id(sub.value_of("id").unwrap());
    let form = parse_assignments(sub)?;

    let catalog = ModelCatalog::new(backend.fetch_models()?);
    let model = catalog
        .get(model_name)
        .cloned()
        .ok_or_else(|| anyhow!("unknown model: {}", model_name))?;

    // Fetch the stored record so the submission is a diff
    let mut session = ExplorerSession::new(catalog, 10);
    session.select_model(model_name)?;
    session.add_filter(&model.primary_key, FilterOperator::Equals, &id_text(&id))?;
    let (seq, descriptor) = session.next_request()?;
    let response = backend.execute(&descriptor)?;
    session.apply_response(seq, &response);

    let initial = session
        .rows()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("record {} not found in {}", id_text(&id), model_name))?;

    match forms::build_update(&model, &initial, &form) {
        Ok(diff) => {
            backend.update_record(model_name, &id, &diff)?;
            println!("Record updated.");
        }
        Err(err) => println!("{}", err),
    }

    Ok(())
}

fn run_delete(backend: &HttpBackend, sub: &ArgMatches) -> Result<()> {
    let model_name = sub.value_of("model").unwrap();
    let id = parse_id(sub.value_of("id").unwrap());

    backend.delete_record(model_name, &id)?;

    println!("Record deleted.");
    Ok(())
}

/// Parse a FIELD:OP:VALUE filter argument
fn parse_filter_spec(spec: &str) -> Result<(String, FilterOperator, String)> {
    let mut parts = spec.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(op), Some(value)) if !field.is_empty() => {
            let op = FilterOperator::from_str(op)?;
            Ok((field.to_string(), op, value.to_string()))
        }
        _ => bail!("filter must be FIELD:OP:VALUE, got '{}'", spec),
    }
}

/// Parse a FIELD[:DIRECTION] sort argument
fn parse_sort_spec(spec: &str) -> Result<SortSpec> {
    let mut parts = spec.splitn(2, ':');
    let field = parts.next().unwrap_or_default();
    if field.is_empty() {
        bail!("sort needs a field name");
    }
    let direction = match parts.next() {
        Some(dir) => SortDirection::from_str(dir)?,
        None => SortDirection::Asc,
    };
    Ok(SortSpec {
        field: field.to_string(),
        direction,
    })
}

/// Collect FIELD=VALUE assignments into a form value map
fn parse_assignments(sub: &ArgMatches) -> Result<BTreeMap<String, String>> {
    let mut form = BTreeMap::new();
    if let Some(values) = sub.values_of("set") {
        for assignment in values {
            match assignment.split_once('=') {
                Some((field, value)) if !field.is_empty() => {
                    form.insert(field.to_string(), value.to_string());
                }
                _ => bail!("assignment must be FIELD=VALUE, got '{}'", assignment),
            }
        }
    }
    Ok(form)
}

/// Interpret a record id as a number when it looks like one
fn parse_id(raw: &str) -> JsonValue {
    raw.parse::<i64>()
        .map(JsonValue::from)
        .unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

fn id_text(id: &JsonValue) -> String {
    match id {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
