use std::net::TcpListener;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, dev::Server, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::Pool;
use secrecy::ExposeSecret;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    payments::PaymentGateway,
    routes::{
        add_cart_item, clear_cart, get_cart, get_menu, get_order_history, health_check, login,
        logout, post_checkout, post_order, register, remove_cart_item, resolve_table,
        update_cart_item,
    },
    utils::DbPool,
};

pub struct Application{
    pub server: Server,
    pub host: String,
    pub port: u16
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Application, anyhow::Error>{
        let pool: DbPool = Pool::new(
            ConnectionManager::<PgConnection>::new(settings.database.get_database_table_url())
        )?;

        // Strategy picked here, once, from configuration: a configured
        // provider secret selects the hosted path, absence the mock path
        let gateway = PaymentGateway::from_settings(&settings.payment);

        let session_key = Key::from(settings.application.hmac_secret.expose_secret().as_bytes());

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();
        let host = settings.application.host;

        let pool = web::Data::new(pool);
        let gateway = web::Data::new(gateway);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .wrap(
                    // TLS terminates upstream; the cookie is signed either way
                    SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                        .cookie_secure(false)
                        .build()
                )
                .route("/health", web::get().to(health_check))
                .route("/register", web::post().to(register))
                .route("/login", web::post().to(login))
                .route("/logout", web::post().to(logout))
                .route("/restaurants/table", web::get().to(resolve_table))
                .route("/restaurants/{restaurant_id}/menu", web::get().to(get_menu))
                .route("/cart", web::get().to(get_cart))
                .route("/cart", web::delete().to(clear_cart))
                .route("/cart/items", web::post().to(add_cart_item))
                .route("/cart/items/{item_id}", web::put().to(update_cart_item))
                .route("/cart/items/{item_id}", web::delete().to(remove_cart_item))
                .route("/orders", web::post().to(post_order))
                .route("/orders", web::get().to(get_order_history))
                .route("/checkout", web::post().to(post_checkout))
                .app_data(pool.clone())
                .app_data(gateway.clone())
        })
        .listen(listener)?
        .run();

        Ok(Application{ server, host, port })
    }
}
