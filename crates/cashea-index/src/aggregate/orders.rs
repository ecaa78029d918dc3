use cashea_core::{ClientOrder, OrderIndexEntry};

/// Project parsed client orders into index entries.
///
/// Missing or zero `amount` becomes 0; missing `customerName` and
/// `createdAt` become `null`.
#[must_use]
pub fn aggregate_orders(orders: Vec<ClientOrder>) -> Vec<OrderIndexEntry> {
    orders
        .into_iter()
        .map(|order| {
            let customer_name = order.customer_name().map(str::to_string);
            OrderIndexEntry {
                id: order.id,
                identifier_number: order.identifier_number,
                amount: order.amount.filter(|a| !a.is_nan()).unwrap_or(0.0),
                status: order.status,
                channel: order.channel,
                customer_name,
                created_at: order.created_at.filter(|c| !c.is_empty()),
            }
        })
        .collect()
}
