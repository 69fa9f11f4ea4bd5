use proc_macro::TokenStream;
use syn_utils::into_macro_output;

#[macro_use]
mod syn_utils;

mod async_props_impl;

/// Implements `AsyncProps` for a struct.
///
/// Fields are visited in declaration order: `take_next_command` returns the first pending command
/// of the first field that has one, and `merge_with_previous` merges each field with the same
/// field of the previous value.
///
/// # Examples
///
/// ```ignore
/// #[derive(AsyncProps)]
/// struct UserPageProps {
///     user: AsyncSelectorResult<AppState, PageProps, Command, User>,
///     posts: AsyncSelectorResult<AppState, PageProps, Command, Vec<Post>>,
/// }
/// ```
#[proc_macro_derive(AsyncProps)]
pub fn derive_async_props(input: TokenStream) -> TokenStream {
    into_macro_output(async_props_impl::derive_async_props(input.into()))
}
