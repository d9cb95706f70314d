//! App Router

use salvo::Router;

use crate::{auth, carts, categories, orders, products, promotions, users};

/// Routes for the storefront API, below any global hoops.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(Router::new().hoop(auth::middleware::handler).push(
            authenticated_router(),
        ))
}

fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(Router::with_path("users").post(users::create::handler))
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("promotions")
                .get(promotions::index::handler)
                .post(promotions::create::handler)
                .push(Router::with_path("codes/{code}").get(promotions::check::handler))
                .push(
                    Router::with_path("{promotion}")
                        .get(promotions::get::handler)
                        .delete(promotions::delete::handler),
                ),
        )
}

fn authenticated_router() -> Router {
    Router::new()
        .push(Router::with_path("auth/logout").post(auth::logout::handler))
        .push(Router::with_path("users/me").get(users::me::handler))
        .push(Router::with_path("cart").get(carts::active::handler))
        .push(
            Router::with_path("carts")
                .get(carts::index::handler)
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .delete(carts::delete::handler)
                        .push(Router::with_path("abandon").post(carts::abandon::handler))
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
}
