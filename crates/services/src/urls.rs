//! Endpoint path templates.
//!
//! Templates use positional `{N}` placeholders and are resolved with
//! [`checkout_api_client::security::url::fill_template`], which encodes
//! every argument.

pub const BASKET_CREATE: &str = "baskets";
pub const BASKET_GET: &str = "baskets/{0}";
pub const BASKET_ITEMS: &str = "baskets/{0}/items";
pub const BASKET_ITEM: &str = "baskets/{0}/items/{1}";

pub const CUSTOMERS: &str = "customers";
pub const CUSTOMER: &str = "customers/{0}";
