use std::env;
use std::time::Duration;

use log::info;

#[derive(Clone)]
pub struct Config {
    host: String,
    port: u16,
    db: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 27017,
            db: String::from("messenger"),
        }
    }
}

impl Config {
    pub fn new(host: impl Into<String>, port: u16, db: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            db: db.into(),
        }
    }

    pub fn env() -> super::Result<Self> {
        let host = env::var("MONGO_HOST")?;
        let port = env::var("MONGO_PORT")?.parse()?;
        let db = env::var("MONGO_DB")?;
        Ok(Self { host, port, db })
    }

    pub fn connect(&self) -> mongodb::Database {
        let options = mongodb::options::ClientOptions::builder()
            .hosts(vec![mongodb::options::ServerAddress::Tcp {
                host: self.host.to_owned(),
                port: Some(self.port),
            }])
            .server_selection_timeout(Some(Duration::from_secs(2)))
            .connect_timeout(Some(Duration::from_secs(5)))
            .build();

        match mongodb::Client::with_options(options).map(|client| client.database(&self.db)) {
            Ok(db) => {
                info!("Using MongoDB {}:{}/{}", self.host, self.port, self.db);
                db
            }
            Err(e) => panic!("Failed to connect to MongoDB: {e}"),
        }
    }
}

#[cfg(test)]
impl Config {
    pub async fn test(
        node: &testcontainers_modules::testcontainers::ContainerAsync<
            testcontainers_modules::mongo::Mongo,
        >,
    ) -> Self {
        Self::new(
            node.get_host().await.unwrap().to_string(),
            node.get_host_port_ipv4(27017).await.unwrap(),
            "test_messenger",
        )
    }
}
