//! Skip/limit query parsing helpers.

use salvo::oapi::extract::QueryParam;
use storefront_app::pagination::Page;

pub(crate) trait PageQueryExt {
    fn into_page(self) -> Page;
}

impl PageQueryExt for (QueryParam<u64, false>, QueryParam<u32, false>) {
    fn into_page(self) -> Page {
        let (skip, limit) = self;

        Page::new(skip.into_inner(), limit.into_inner())
    }
}
