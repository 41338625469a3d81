use std::io::{self, Write};

use storefront_core::prelude::*;

const NO_RESULTS: &str = "No results";

/// Prints the dropdown the way the navbar would show it.
pub fn view(out: &mut impl Write, view: SearchView<'_>) -> io::Result<()> {
    match view {
        SearchView::Hidden => Ok(()),
        SearchView::Skeleton { rows } => {
            for _ in 0..rows {
                writeln!(out, "  ░░░░░░░░░░░░░░░░░░░░")?;
            }
            Ok(())
        }
        SearchView::Results(results) => {
            for r in results {
                writeln!(out, "  • {}", r.name())?;
            }
            Ok(())
        }
        SearchView::NoResults => writeln!(out, "  {NO_RESULTS}"),
        SearchView::Error(failure) => match failure.kind {
            FailureKind::Decode => writeln!(out, "  {NO_RESULTS} (unreadable response)"),
            _ => writeln!(out, "  {NO_RESULTS} ({failure})"),
        },
    }
}

pub fn product(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "Product: {}", product.name())?;
    writeln!(out, "Id: {}", product.id())?;
    for (key, value) in &product.extra {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}
