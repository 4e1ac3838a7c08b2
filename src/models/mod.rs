/// Request bodies.
pub(crate) mod body;

/// Response envelopes.
pub(crate) mod envelope;

/// The [`Raindrop`] entity, its identifier and the response mapper.
///
/// [`Raindrop`]: crate::models::raindrop::Raindrop
pub mod raindrop;

/// Endpoint URLs.
pub mod url;

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}
