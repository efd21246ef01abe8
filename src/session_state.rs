use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::FromRequest;
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::cart::Cart;

// Typed facade over the cookie session: the signed-in user (if any) and
// the diner's cart both live here, scoped to one browsing session
pub struct TypedSession(pub Session);

impl TypedSession {
    const USER_ID_KEY: &'static str = "user_id";
    const CART_KEY: &'static str = "cart";

    pub fn get_user_id(&self) -> Result<Option<Uuid>, SessionGetError>{
        self.0.get(Self::USER_ID_KEY)
    }

    pub fn insert_user_id(&self, user_id: Uuid) -> Result<(), SessionInsertError>{
        self.0.insert(Self::USER_ID_KEY, user_id)
    }

    pub fn get_cart(&self) -> Result<Option<Cart>, SessionGetError>{
        self.0.get(Self::CART_KEY)
    }

    pub fn insert_cart(&self, cart: &Cart) -> Result<(), SessionInsertError>{
        self.0.insert(Self::CART_KEY, cart)
    }

    pub fn remove_cart(&self){
        self.0.remove(Self::CART_KEY);
    }

    pub fn renew(&self){
        self.0.renew();
    }

    pub fn purge(&self){
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req.get_session();
        ready(Ok(TypedSession(session)))
    }
}
