//! Quick demo of result materialization against the in-memory executor
//!
//! Runs without a database: rows are scripted on a MemoryExecutor, then
//! materialized into derived records exactly the way a PgPoolExecutor result
//! set would be.
//!
//! Run with: cargo run --example demo

use rowbridge::prelude::*;

#[derive(Debug, Default, Record)]
#[record(after_load)]
pub struct Sensor {
    #[primary_key]
    pub id: i64,

    #[field(size = 64)]
    pub label: String,

    pub online: bool,

    pub readings: Vec<i32>,

    pub zones: Vec<String>,

    pub metadata: Hstore,

    #[field(skip)]
    pub summary: String,
}

impl Sensor {
    fn after_load(&mut self) {
        self.summary = format!("{} [{} readings]", self.label, self.readings.len());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== RowBridge Demo ===\n");

    // Script a result set the way the driver would hand it over: scalars
    // decoded, integer arrays pre-decoded, text arrays as literal text,
    // hstore as its wire format.
    let mut executor = MemoryExecutor::new(vec![
        "id",
        "label",
        "online",
        "readings",
        "zones",
        "metadata",
        "internal_checksum",
    ]);
    executor.push_row(vec![
        PgValue::Int(1),
        PgValue::Text("roof-north".into()),
        PgValue::Bool(true),
        PgValue::IntSeq(vec![18, 21, 19]),
        PgValue::Bytes(b"{\"attic\",\"vent\"}".to_vec()),
        PgValue::Text(r#""firmware"=>"2.4", "calibrated"=>NULL"#.into()),
        PgValue::Text("ignored".into()),
    ]);
    executor.push_row(vec![
        PgValue::Int(2),
        PgValue::Text("basement".into()),
        PgValue::Bool(false),
        PgValue::Null,
        PgValue::Null,
        PgValue::Null,
        PgValue::Text("ignored".into()),
    ]);

    // The scope carries the statement, binds, and the per-call error channel.
    let mut scope = QueryScope::new("SELECT * FROM sensors WHERE site_id = $1").bind(42i64);
    let sensors: Vec<Sensor> = fetch_all(&executor, &mut scope).await?;

    println!("Materialized {} sensors:", sensors.len());
    for sensor in &sensors {
        println!(
            "  #{} {} online={} zones={:?} metadata={:?}",
            sensor.id, sensor.summary, sensor.online, sensor.zones, sensor.metadata
        );
    }

    // Single-record lookups surface zero rows as a distinct condition.
    let empty = MemoryExecutor::new(vec!["id", "label"]);
    let mut miss = QueryScope::new("SELECT * FROM sensors WHERE id = $1 LIMIT 1").bind(999i64);
    match fetch_one::<Sensor, _>(&empty, &mut miss).await {
        Ok(sensor) => println!("\nUnexpected sensor: {:?}", sensor),
        Err(e) if e.is_not_found() => println!("\nSensor 999: not found (distinct condition)"),
        Err(e) => return Err(e.into()),
    }

    // The dialect surface formats statement pieces and pre-binds sequences.
    let dialect = PgDialect;
    println!("\nDialect surface:");
    println!("  placeholder: {}", dialect.bind_var(3));
    println!("  quoted:      {}", dialect.quote("user_name"));
    println!("  returning:   {}", dialect.returning("id"));
    println!(
        "  array bind:  {:?}",
        dialect.db_value(PgValue::TextSeq(vec!["a".into(), "b".into()]))
    );

    // Dialect-formatted teardown DDL.
    println!("\nGenerated DDL:");
    println!("  {}", migration::drop_table_sql("gauges"));

    Ok(())
}
