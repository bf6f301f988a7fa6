use crate::core::{Payment, PaymentKind, RawChainTransaction, RawInvoice};

/// Sums the outputs paid to `receiving_address`; every other output is ignored.
pub fn normalize_chain(tx: &RawChainTransaction, receiving_address: &str) -> Payment {
    let value = tx
        .outputs
        .iter()
        .filter(|out| out.address.as_deref() == Some(receiving_address))
        .fold(0u64, |sum, out| sum.saturating_add(out.value));

    Payment {
        kind: PaymentKind::OnChain,
        value,
    }
}

pub fn normalize_invoice(invoice: &RawInvoice) -> Payment {
    Payment {
        kind: PaymentKind::OffChain,
        value: invoice.value,
    }
}
