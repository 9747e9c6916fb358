//! The cart as the shopper sees it.
//!
//! Signed-out shoppers keep their cart in local storage under
//! [`CART_ITEMS_KEY`]. Signed-in shoppers use the server cart, and every
//! mutation is a remote call followed by a refetch. Logging in does not
//! merge the two: the server cart simply replaces the local view.

use crate::{AuthStatus, Notice, StorefrontApi, StorefrontError};
use tailor_cache::{Cache, KvStore};
use tailor_commerce::cart::{CartChange, CartLine, CartLines, CartQuote};
use tailor_commerce::catalog::ProductVariant;
use tailor_commerce::checkout::NewOrder;
use tailor_commerce::{AddressId, Currency, Money, ProductId, VariantId};
use tailor_data::Transport;
use tailor_observability::StructuredLogger;

/// Local storage key of the signed-out cart.
pub const CART_ITEMS_KEY: &str = "cart-items";

/// API detail returned when a cart line no longer exists server-side.
/// It is not worth telling the shopper about.
pub const NO_PRODUCT_DETAIL: &str = "No Product matches the given query.";

/// Shown once a cash-on-delivery order is accepted.
pub const ORDER_PLACED: &str = "Order placed. Pay cash on delivery.";

/// Cart state that follows the authentication status.
pub struct CartStore<S, T> {
    cache: Cache<S>,
    api: StorefrontApi<T>,
    status: AuthStatus,
    lines: CartLines,
    loading: bool,
    logger: StructuredLogger,
}

impl<S: KvStore, T: Transport> CartStore<S, T> {
    /// A signed-out store. Call [`CartStore::sync`] to load lines.
    pub fn new(cache: Cache<S>, api: StorefrontApi<T>) -> Self {
        Self {
            cache,
            api,
            status: AuthStatus::Anonymous,
            lines: CartLines::new(),
            loading: false,
            logger: StructuredLogger::default().with_component("cart"),
        }
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("cart");
        self
    }

    /// Adopt a new authentication status and reload the matching cart.
    ///
    /// On failure the previous lines stay in place.
    pub async fn sync(&mut self, status: AuthStatus) -> Result<(), StorefrontError> {
        self.status = status;
        match self.status.token().map(str::to_owned) {
            Some(token) => self.refresh_remote(&token).await,
            None => {
                self.lines = self.read_local()?;
                Ok(())
            }
        }
    }

    /// Add one piece of a variant.
    pub async fn increase(
        &mut self,
        product: ProductId,
        variant: VariantId,
        message: Option<&str>,
    ) -> Option<Notice> {
        match self.status.token().map(str::to_owned) {
            Some(token) => {
                let change = self.lines.plan_increment(product, variant);
                self.apply_remote(&token, change, message).await
            }
            None => {
                self.apply_local(message, |lines| {
                    lines.increment(product, variant);
                })
            }
        }
    }

    /// Remove one piece of a variant; the line goes away at zero. Variants
    /// not in the cart are ignored.
    pub async fn decrease(
        &mut self,
        product: ProductId,
        variant: VariantId,
        message: Option<&str>,
    ) -> Option<Notice> {
        match self.status.token().map(str::to_owned) {
            Some(token) => {
                let change = self.lines.plan_decrement(product, variant)?;
                self.apply_remote(&token, change, message).await
            }
            None => {
                self.apply_local(message, |lines| {
                    lines.decrement(product, variant);
                })
            }
        }
    }

    /// Empty the cart wherever it lives.
    pub async fn clear(&mut self) -> Result<(), StorefrontError> {
        match self.status.token().map(str::to_owned) {
            Some(token) => {
                self.loading = true;
                let result = self.api.clear_cart(&token).await;
                self.loading = false;
                result?;
            }
            None => self.cache.delete(CART_ITEMS_KEY)?,
        }
        self.lines.clear();
        self.logger.info("cart cleared");
        Ok(())
    }

    /// Place a cash-on-delivery order for the server cart, then empty it.
    ///
    /// Lines are priced against the current variant stock first, so a cart
    /// the shop cannot fill never reaches the sales endpoint. Signed-out
    /// shoppers get [`StorefrontError::NotAuthenticated`].
    pub async fn checkout(
        &mut self,
        shipping: AddressId,
        discount: Option<Money>,
    ) -> Result<NewOrder, StorefrontError> {
        let token = self
            .status
            .token()
            .map(str::to_owned)
            .ok_or(StorefrontError::NotAuthenticated)?;

        self.loading = true;
        let result = self.place_order(&token, shipping, discount).await;
        self.loading = false;
        let order = match result {
            Ok(order) => order,
            Err(e) => {
                self.logger
                    .error_builder("checkout failed")
                    .field("error", e.to_string())
                    .emit();
                return Err(e);
            }
        };

        self.logger
            .info_builder("order placed")
            .field("transactionuid", order.transactionuid.clone())
            .field("total", order.total_amt.display())
            .field_i64("pieces", order.total_pieces())
            .emit();

        if let Err(e) = self.api.clear_cart(&token).await {
            self.logger
                .warn_builder("cart clear after checkout failed")
                .field("error", e.to_string())
                .emit();
        }
        if self.refresh_remote(&token).await.is_err() {
            self.lines.clear();
        }
        Ok(order)
    }

    pub fn lines(&self) -> &[CartLine] {
        self.lines.as_slice()
    }

    pub fn cart(&self) -> &CartLines {
        &self.lines
    }

    /// Sum of pieces over every line.
    pub fn total_pieces(&self) -> i64 {
        self.lines.total_pieces()
    }

    /// True while a cart request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    fn read_local(&self) -> Result<CartLines, StorefrontError> {
        match self.cache.get::<CartLines>(CART_ITEMS_KEY) {
            Ok(lines) => Ok(lines.unwrap_or_default()),
            Err(tailor_cache::CacheError::SerializeError(e)) => {
                self.logger
                    .warn_builder("discarding unreadable local cart")
                    .field("error", e.to_string())
                    .emit();
                Ok(CartLines::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn apply_local(
        &mut self,
        message: Option<&str>,
        mutate: impl FnOnce(&mut CartLines),
    ) -> Option<Notice> {
        self.loading = true;
        let result = self.read_local().and_then(|mut stored| -> Result<_, StorefrontError> {
            mutate(&mut stored);
            self.cache.set(CART_ITEMS_KEY, &stored.to_local())?;
            self.read_local()
        });
        self.loading = false;

        match result {
            Ok(lines) => {
                self.lines = lines;
                self.logger
                    .debug_builder("local cart updated")
                    .field_i64("pieces", self.lines.total_pieces())
                    .emit();
                message.map(Notice::success)
            }
            Err(e) => {
                self.logger
                    .error_builder("local cart update failed")
                    .field("error", e.to_string())
                    .emit();
                Some(Notice::from_error(&e))
            }
        }
    }

    async fn apply_remote(
        &mut self,
        token: &str,
        change: CartChange,
        message: Option<&str>,
    ) -> Option<Notice> {
        self.loading = true;
        let result = match change {
            CartChange::Create { product, variant } => {
                self.api.add_to_cart(token, product, variant).await
            }
            CartChange::Update {
                product,
                variant,
                pcs,
            } => {
                self.api
                    .update_cart_line(token, &CartLine::new(product, variant, pcs))
                    .await
            }
            CartChange::Delete { product, variant } => {
                self.api.remove_from_cart(token, product, variant).await
            }
        };
        self.loading = false;

        if let Err(e) = result {
            if e.api_detail().as_deref() == Some(NO_PRODUCT_DETAIL) {
                self.logger
                    .debug_builder("ignoring missing server cart line")
                    .field("change", format!("{:?}", change))
                    .emit();
                return None;
            }
            self.logger
                .error_builder("cart update failed")
                .field("error", e.to_string())
                .emit();
            return Some(Notice::from_error(&e));
        }

        if let Err(e) = self.refresh_remote(token).await {
            self.logger
                .warn_builder("cart refetch failed; applying change locally")
                .field("error", e.to_string())
                .emit();
            apply_change(&mut self.lines, change);
        }
        message.map(Notice::success)
    }

    async fn place_order(
        &self,
        token: &str,
        shipping: AddressId,
        discount: Option<Money>,
    ) -> Result<NewOrder, StorefrontError> {
        let mut variants = Vec::new();
        for line in self.lines.iter() {
            if variants.iter().all(|v: &ProductVariant| v.id != line.variant) {
                variants.push(self.api.variant(line.variant).await?);
            }
        }
        let quote = CartQuote::price(&self.lines, &variants, Currency::NPR)?;
        let order = NewOrder::from_quote(&quote, shipping, discount, &mut rand::thread_rng())?;
        self.api.place_order(token, &order).await?;
        Ok(order)
    }

    async fn refresh_remote(&mut self, token: &str) -> Result<(), StorefrontError> {
        self.loading = true;
        let result = self.api.cart(token).await;
        self.loading = false;
        self.lines = result?;
        self.logger
            .debug_builder("server cart loaded")
            .field_i64("lines", self.lines.len() as i64)
            .emit();
        Ok(())
    }
}

fn apply_change(lines: &mut CartLines, change: CartChange) {
    match change {
        CartChange::Create { product, variant } => lines.set_pcs(product, variant, 1),
        CartChange::Update {
            product,
            variant,
            pcs,
        } => lines.set_pcs(product, variant, pcs),
        CartChange::Delete { product, variant } => {
            lines.remove(product, variant);
        }
    }
}
