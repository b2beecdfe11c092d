//! TCP listener binding.
//!
//! # Responsibilities
//! - Normalise `:port` addresses to all interfaces
//! - Bind every configured address before serving starts

use tokio::net::TcpListener;

use crate::error::FlashError;

/// `":8080"` becomes `"0.0.0.0:8080"`; other addresses are unchanged.
pub fn normalize_address(address: &str) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    }
}

/// Bind one address.
pub async fn bind(address: &str) -> Result<TcpListener, FlashError> {
    let normalized = normalize_address(address);
    let listener = TcpListener::bind(&normalized)
        .await
        .map_err(|source| FlashError::Bind {
            address: address.to_string(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}

/// Bind all addresses; fails on the first address that cannot be bound.
pub async fn bind_all<A: AsRef<str>>(addresses: &[A]) -> Result<Vec<TcpListener>, FlashError> {
    let mut listeners = Vec::with_capacity(addresses.len());
    for address in addresses {
        listeners.push(bind(address.as_ref()).await?);
    }
    Ok(listeners)
}
