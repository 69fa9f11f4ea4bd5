use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, spanned::Spanned, Data, DeriveInput, Fields, Index, Member, Result};

pub fn derive_async_props(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => bail!(
            data.enum_token.span(),
            "`#[derive(AsyncProps)]` supports only structs"
        ),
        Data::Union(data) => bail!(
            data.union_token.span(),
            "`#[derive(AsyncProps)]` supports only structs"
        ),
    };
    let members: Vec<Member> = match fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|f| f.ident.clone())
            .map(Member::Named)
            .collect(),
        Fields::Unnamed(fields) => (0..fields.unnamed.len())
            .map(|index| Member::Unnamed(Index::from(index)))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let mut generics = input.generics.clone();
    generics.params.push(parse_quote!(__S));
    generics.params.push(parse_quote!(__P));
    generics.params.push(parse_quote!(__C));
    let where_clause = generics.make_where_clause();
    for field in fields {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::async_reconcile::AsyncProps<__S, __P, __C>));
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let (_, type_generics, _) = input.generics.split_for_impl();
    let ident = &input.ident;

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::async_reconcile::AsyncProps<__S, __P, __C> for #ident #type_generics
        #where_clause
        {
            fn take_next_command(&mut self) -> ::core::option::Option<__C> {
                #(
                    if let ::core::option::Option::Some(command) =
                        ::async_reconcile::AsyncProps::<__S, __P, __C>::take_next_command(
                            &mut self.#members,
                        )
                    {
                        return ::core::option::Option::Some(command);
                    }
                )*
                ::core::option::Option::None
            }

            #[allow(unused_variables)]
            fn merge_with_previous(self, prev: Self, app_state: &__S, own_props: &__P) -> Self {
                Self {
                    #(
                        #members:
                            ::async_reconcile::AsyncProps::<__S, __P, __C>::merge_with_previous(
                                self.#members,
                                prev.#members,
                                app_state,
                                own_props,
                            ),
                    )*
                }
            }
        }
    })
}
