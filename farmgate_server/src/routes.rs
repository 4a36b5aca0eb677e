//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions, which get executed
//! concurrently by worker threads and thus don't block execution.

use actix_web::{get, web, HttpResponse, Responder};
use farmgate_engine::{
    db_types::{CheckoutDetails, NewProduct},
    traits::{CartManagement, MarketplaceDatabase, OrderManagement, ProductManagement},
    CartApi,
    OrderFlowApi,
    ProductApi,
};
use log::*;

use crate::{
    auth::JwtClaims,
    data_objects::{AddToCartRequest, DirectOrderRequest, JsonResponse, StatusUpdateRequest},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------  Products  ----------------------------------------------------
route!(create_product => Post "/products" impl ProductManagement);
/// Route handler for farmers listing new produce.
///
/// The response echoes the freshness assessment (score, tier and smart-deal discount, if any) so
/// clients can display the listing state immediately.
pub async fn create_product<B: ProductManagement>(
    claims: JwtClaims,
    body: web::Json<NewProduct>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = body.into_inner();
    debug!("💻️ POST create_product for user {}", claims.sub);
    let created = api.create_product(&claims.identity(), &product).await?;
    Ok(HttpResponse::Created().json(created))
}

route!(product_list => Get "/products" impl ProductManagement);
/// Browsing the catalog requires no authentication. Freshness numbers are derived against the
/// current clock on every call.
pub async fn product_list<B: ProductManagement>(api: web::Data<ProductApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET product_list");
    let listings = api.products().await?;
    Ok(HttpResponse::Ok().json(listings))
}

route!(product_by_id => Get "/products/{id}" impl ProductManagement);
pub async fn product_by_id<B: ProductManagement>(
    path: web::Path<i64>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    trace!("💻️ GET product_by_id {product_id}");
    let listing = api.product(product_id).await?;
    Ok(HttpResponse::Ok().json(listing))
}

//----------------------------------------------    Cart    ----------------------------------------------------
route!(add_to_cart => Post "/cart" impl CartManagement, ProductManagement);
pub async fn add_to_cart<B: CartManagement + ProductManagement>(
    claims: JwtClaims,
    body: web::Json<AddToCartRequest>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST add_to_cart for user {}: product #{}", claims.sub, req.product_id);
    let cart = api.add_to_cart(&claims.identity(), req.product_id, req.quantity, req.unit_type.as_deref()).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(my_cart => Get "/cart" impl CartManagement, ProductManagement);
pub async fn my_cart<B: CartManagement + ProductManagement>(
    claims: JwtClaims,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_cart for user {}", claims.sub);
    let cart = api.cart(&claims.identity()).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(remove_cart_item => Delete "/cart/{id}" impl CartManagement, ProductManagement);
pub async fn remove_cart_item<B: CartManagement + ProductManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let line_id = path.into_inner();
    debug!("💻️ DELETE remove_cart_item {line_id} for user {}", claims.sub);
    api.remove_line(&claims.identity(), line_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Item removed from cart")))
}

//----------------------------------------------   Orders   ----------------------------------------------------
route!(checkout => Post "/checkout" impl MarketplaceDatabase, OrderManagement);
/// Route handler for cart checkout.
///
/// Converts every line in the vendor's cart into a pending order, atomically. Either every line
/// succeeds, or the response reports the first shortfall and nothing changes.
pub async fn checkout<B: MarketplaceDatabase + OrderManagement>(
    claims: JwtClaims,
    body: web::Json<CheckoutDetails>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let details = body.into_inner();
    debug!("💻️ POST checkout for user {}", claims.sub);
    let orders = api.checkout(&claims.identity(), &details).await?;
    Ok(HttpResponse::Created().json(orders))
}

route!(direct_order => Post "/orders" impl MarketplaceDatabase, OrderManagement);
pub async fn direct_order<B: MarketplaceDatabase + OrderManagement>(
    claims: JwtClaims,
    body: web::Json<DirectOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST direct_order for user {}: product #{}", claims.sub, req.product_id);
    let order = api.direct_purchase(&claims.identity(), req.product_id, req.quantity).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(my_orders => Get "/orders/mine" impl MarketplaceDatabase, OrderManagement);
pub async fn my_orders<B: MarketplaceDatabase + OrderManagement>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_orders for user {}", claims.sub);
    let history = api.purchases(&claims.identity()).await?;
    Ok(HttpResponse::Ok().json(history))
}

route!(my_sales => Get "/orders/sales" impl MarketplaceDatabase, OrderManagement);
pub async fn my_sales<B: MarketplaceDatabase + OrderManagement>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_sales for user {}", claims.sub);
    let history = api.sales(&claims.identity()).await?;
    Ok(HttpResponse::Ok().json(history))
}

route!(update_order_status => Patch "/orders/{id}/status" impl MarketplaceDatabase, OrderManagement);
pub async fn update_order_status<B: MarketplaceDatabase + OrderManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let req = body.into_inner();
    debug!("💻️ PATCH update_order_status {order_id} -> {} for user {}", req.status, claims.sub);
    let order = api.update_status(&claims.identity(), order_id, &req.status).await?;
    Ok(HttpResponse::Ok().json(order))
}
