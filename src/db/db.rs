use crate::db::migrations;
use crate::libs::data_storage::DataStorage;
use rusqlite::Connection;
use std::error::Error;

pub const DB_FILE_NAME: &str = "ajr.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db, Box<dyn Error>> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn: Connection = Connection::open(db_file_path)?;
        migrations::init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
