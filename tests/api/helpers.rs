use std::error::Error;

use diesel::{pg::Pg, r2d2::ConnectionManager, Connection, PgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use once_cell::sync::Lazy;
use r2d2::Pool;
use reqwest::redirect::Policy;
use secrecy::SecretString;
use tableside::{
    configuration::{DatabaseSettings, Settings},
    domain::menu_category::MenuCategory,
    models::{MenuItem, Restaurant, RestaurantTable},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
    utils::DbPool,
};
use uuid::Uuid;
use wiremock::MockServer;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "tableside-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }

    ()
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub payment_api: MockServer,
    pub api_client: reqwest::Client
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let pool = Pool::new(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    async fn spawn_with_gateway(provider_configured: bool) -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let payment_api = MockServer::start().await;

        let mut settings = Settings::get();
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();
        settings.payment.api_uri = payment_api.uri();
        settings.payment.secret_key = if provider_configured {
            Some(SecretString::from("sk_test_0123456789"))
        } else {
            None
        };

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        let api_client = reqwest::Client::builder()
                            .redirect(Policy::none())
                            .cookie_store(true)
                            .build()
                            .unwrap();

        TestApp{
            host,
            port,
            pool,
            payment_api,
            api_client
        }
    }

    // Payment provider secret configured; checkout hits the wiremock provider
    pub async fn spawn_app() -> TestApp{
        TestApp::spawn_with_gateway(true).await
    }

    // No provider secret; checkout takes the mock path
    pub async fn spawn_app_without_provider() -> TestApp{
        TestApp::spawn_with_gateway(false).await
    }

    pub fn seed_restaurant(&self, name: &str) -> Restaurant{
        use tableside::schema::restaurants;

        let restaurant = Restaurant{
            restaurant_id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some("A fine dining experience".to_string()),
            address: Some("123 Main Street, London, UK".to_string()),
            phone: None,
            email: None
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(restaurants::table)
            .values(&restaurant)
            .execute(&mut conn)
            .expect("Failed to seed restaurant");

        restaurant
    }

    pub fn seed_table(&self, restaurant_id: Uuid, table_number: i32, qr_code: &str) -> RestaurantTable{
        use tableside::schema::restaurant_tables;

        let table = RestaurantTable{
            table_id: Uuid::new_v4(),
            restaurant_id,
            table_number,
            qr_code: qr_code.to_string()
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(restaurant_tables::table)
            .values(&table)
            .execute(&mut conn)
            .expect("Failed to seed table");

        table
    }

    pub fn seed_menu_item(
        &self,
        restaurant_id: Uuid,
        name: &str,
        price_minor: i64,
        category: MenuCategory,
        is_available: bool
    ) -> MenuItem{
        use tableside::schema::menu_items;

        let item = MenuItem{
            item_id: Uuid::new_v4(),
            restaurant_id,
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            price: price_minor,
            category: category.as_str().to_string(),
            image: None,
            is_available
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(menu_items::table)
            .values(&item)
            .execute(&mut conn)
            .expect("Failed to seed menu item");

        item
    }

    pub async fn register_and_login(&self, email: &str){
        let registration = serde_json::json!({
            "email": email,
            "name": "Test Diner",
            "password": "testpassword",
            "confirm_password": "testpassword"
        });

        let response = self.api_client
            .post(format!("{}/register", self.get_app_url()))
            .form(&registration)
            .send()
            .await
            .expect("Failed to send request to register endpoint");
        assert_eq!(response.status().as_u16(), 200);

        let login = serde_json::json!({
            "email": email,
            "password": "testpassword"
        });

        let response = self.api_client
            .post(format!("{}/login", self.get_app_url()))
            .form(&login)
            .send()
            .await
            .expect("Failed to send request to login endpoint");
        assert_eq!(response.status().as_u16(), 200);
    }

    pub async fn post_order(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client
            .post(format!("{}/orders", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to orders endpoint")
    }

    pub async fn post_checkout(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client
            .post(format!("{}/checkout", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to checkout endpoint")
    }

    // Drives the whole happy path up to a created order and returns its id
    pub async fn create_order(
        &self,
        restaurant_id: Uuid,
        table_number: i32,
        items: &serde_json::Value
    ) -> Uuid{
        let body = serde_json::json!({
            "restaurantId": restaurant_id,
            "tableNumber": table_number,
            "items": items
        });

        let response = self.post_order(&body).await;
        assert_eq!(response.status().as_u16(), 201);

        let created = response.json::<serde_json::Value>().await.unwrap();
        created["orderId"].as_str().unwrap().parse().unwrap()
    }
}
