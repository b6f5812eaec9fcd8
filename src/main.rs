use ferrum_tablestore::config::StoreConfig;
use ferrum_tablestore::console::{error_message, highlight_argument, system_message, table_summary};
use ferrum_tablestore::persistence::{DataType, TableResult, TableStore, Value};
use log::error;

fn main() {
    env_logger::init();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(msg) => {
            error!("err: {}", msg);
            std::process::exit(1);
        }
    };

    let mut store = match config.open() {
        Ok(store) => store,
        Err(msg) => {
            println!("{}", error_message("store", &msg));
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        system_message(
            "store",
            format!(
                "Opened '{}' with {}.",
                highlight_argument(&store.path().display().to_string()),
                table_summary(&store.read())
            )
        )
    );

    if let Err(msg) = run_demo(&mut store) {
        println!("{}", error_message("store", &msg));
    }

    println!("{}", store.read())
}

fn run_demo(store: &mut TableStore) -> TableResult<()> {
    //! Register a few rows, touch one of them and drop another, the way a
    //! small program would use the store.

    let columns = store.columns();
    let dataset = vec![(1, "Jansen"), (2, "Bonega"), (3, "Maharashtra")];

    for (id, name) in dataset {
        let values = [Value::from(id), Value::from(name)];
        let fields = columns.iter().cloned().zip(values);

        if let Err(msg) = store.insert(fields) {
            println!("{}", error_message("insert", &msg));
            return Ok(());
        }
    }

    let text_column = columns
        .iter()
        .find(|column| store.schema().datatype(column) == Some(DataType::Text));
    if let Some(column) = text_column {
        store.update(0, column, "Lorem")?;
    }
    store.delete([1])?;

    println!(
        "{}",
        system_message("store", format!("Done; {}.", table_summary(&store.read())))
    );

    Ok(())
}
