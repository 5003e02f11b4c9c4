//! Built-in contracts for the steel-trading ERP API.
//!
//! Item schemas are passthrough objects that pin down the fields list and
//! detail views rely on; the backend is free to send more.

use api_contracts_core::{
    ContractDefinition, EnvelopeContract, FieldSchema, ObjectSchemaBuilder, PageInfo, Result,
    StringFormat, TypeSchema,
};

use crate::{ContractRegistry, EnvelopeRegistry};

const INVOICE_STATUSES: [&str; 6] = ["draft", "issued", "sent", "paid", "overdue", "cancelled"];
const NOTE_STATUSES: [&str; 5] = ["draft", "pending", "approved", "applied", "cancelled"];
const ORDER_STATUSES: [&str; 5] = ["draft", "pending", "approved", "received", "cancelled"];
const DELIVERY_STATUSES: [&str; 4] = ["pending", "dispatched", "delivered", "cancelled"];

/// List endpoints and the array key their responses carry.
const LIST_ENVELOPES: [(&str, &str, bool); 12] = [
    ("/invoices", "invoices", true),
    ("/credit-notes", "creditNotes", true),
    ("/debit-notes", "debitNotes", true),
    ("/customers", "customers", true),
    ("/products", "products", true),
    ("/delivery-notes", "deliveryNotes", true),
    ("/purchase-orders", "purchaseOrders", true),
    ("/supplier-bills", "supplierBills", true),
    ("/vendor-bills", "vendorBills", true),
    ("/advance-payments", "advancePayments", true),
    ("/vat-amendments", "vatAmendments", true),
    ("/stock-batches/available", "batches", false),
];

/// Builds the envelope table for the ERP list endpoints.
pub fn erp_envelopes() -> Result<EnvelopeRegistry> {
    LIST_ENVELOPES
        .iter()
        .fold(EnvelopeRegistry::builder(), |builder, (prefix, key, paged)| {
            let envelope = if *paged {
                EnvelopeContract::paginated(*key)
            } else {
                EnvelopeContract::list(*key)
            };
            builder.envelope(*prefix, envelope)
        })
        .build()
}

/// Builds the contract table for the ERP endpoints.
pub fn erp_contracts() -> Result<ContractRegistry> {
    let invoice = invoice();
    let customer = customer();
    let product = product();
    let credit_note = credit_note();
    let debit_note = debit_note();
    let delivery_note = delivery_note();
    let purchase_order = purchase_order();
    let supplier_bill = supplier_bill();
    let advance_payment = advance_payment();
    let vat_amendment = vat_amendment();

    ContractRegistry::builder()
        // invoices
        .contract(
            "GET /invoices",
            ContractDefinition::response_only(list_of("invoices", invoice.clone()))
                .with_description("List invoices"),
        )
        .contract(
            "GET /invoices/number/next",
            ContractDefinition::response_only(next_number()).with_description("Next invoice number"),
        )
        .contract(
            "GET /invoices/analytics",
            ContractDefinition::response_only(invoice_analytics())
                .with_description("Invoice totals by status"),
        )
        .contract(
            "GET /invoices/:id",
            ContractDefinition::response_only(invoice.clone()).with_description("Fetch one invoice"),
        )
        .contract(
            "POST /invoices",
            ContractDefinition::new(invoice_input(), invoice.clone())
                .with_description("Create a draft invoice"),
        )
        .contract(
            "PUT /invoices/:id",
            ContractDefinition::new(invoice_input(), invoice.clone())
                .with_description("Update a draft invoice"),
        )
        .contract(
            "PATCH /invoices/:id/status",
            ContractDefinition::new(status_change(&INVOICE_STATUSES), invoice.clone())
                .with_description("Change invoice status"),
        )
        .contract(
            "PATCH /invoices/:id/restore",
            ContractDefinition::response_only(invoice.clone())
                .with_description("Restore a deleted invoice"),
        )
        .contract(
            "POST /invoices/:id/issue",
            ContractDefinition::response_only(invoice).with_description("Issue a draft invoice"),
        )
        .contract(
            "DELETE /invoices/:id",
            ContractDefinition::response_only(deleted()).with_description("Delete an invoice"),
        )
        // credit notes
        .contract(
            "GET /credit-notes",
            ContractDefinition::response_only(list_of("creditNotes", credit_note.clone())),
        )
        .contract(
            "GET /credit-notes/:id",
            ContractDefinition::response_only(credit_note.clone()),
        )
        .contract(
            "POST /credit-notes",
            ContractDefinition::new(credit_note_input(), credit_note)
                .with_description("Create a credit note against an invoice"),
        )
        // debit notes
        .contract(
            "GET /debit-notes",
            ContractDefinition::response_only(list_of("debitNotes", debit_note.clone())),
        )
        .contract(
            "GET /debit-notes/:id",
            ContractDefinition::response_only(debit_note.clone()),
        )
        .contract(
            "GET /debit-notes/:id/allowed-transitions",
            ContractDefinition::response_only(allowed_transitions()),
        )
        .contract(
            "POST /debit-notes/:id/approve",
            ContractDefinition::response_only(debit_note.clone()),
        )
        .contract(
            "POST /debit-notes/:id/cancel",
            ContractDefinition::new(cancellation(), debit_note),
        )
        .contract(
            "DELETE /debit-notes/:id",
            ContractDefinition::response_only(deleted()),
        )
        // customers
        .contract(
            "GET /customers",
            ContractDefinition::response_only(list_of("customers", customer.clone())),
        )
        .contract(
            "GET /customers/credit-metrics/dashboard",
            ContractDefinition::response_only(credit_dashboard()),
        )
        .contract(
            "GET /customers/:id",
            ContractDefinition::response_only(customer.clone()),
        )
        .contract(
            "GET /customers/:id/credit-summary",
            ContractDefinition::response_only(credit_summary()),
        )
        .contract(
            "GET /customers/:id/aging",
            ContractDefinition::response_only(aging_report()),
        )
        .contract(
            "POST /customers",
            ContractDefinition::new(customer_input(), customer.clone()),
        )
        .contract(
            "PUT /customers/:id",
            ContractDefinition::new(customer_input(), customer.clone()),
        )
        .contract(
            "PUT /customers/:id/credit-limit",
            ContractDefinition::new(credit_limit_input(), customer),
        )
        // products
        .contract(
            "GET /products",
            ContractDefinition::response_only(list_of("products", product.clone())),
        )
        .contract(
            "GET /products/:id",
            ContractDefinition::response_only(product.clone()),
        )
        .contract(
            "POST /products",
            ContractDefinition::new(product_input(), product.clone()),
        )
        .contract(
            "PUT /products/:id",
            ContractDefinition::new(product_input(), product),
        )
        // delivery notes
        .contract(
            "GET /delivery-notes",
            ContractDefinition::response_only(list_of("deliveryNotes", delivery_note.clone())),
        )
        .contract(
            "GET /delivery-notes/:id",
            ContractDefinition::response_only(delivery_note.clone()),
        )
        .contract(
            "POST /delivery-notes",
            ContractDefinition::new(delivery_note_input(), delivery_note.clone()),
        )
        .contract(
            "PATCH /delivery-notes/:id/status",
            ContractDefinition::new(status_change(&DELIVERY_STATUSES), delivery_note),
        )
        // purchase orders
        .contract(
            "GET /purchase-orders",
            ContractDefinition::response_only(list_of("purchaseOrders", purchase_order.clone())),
        )
        .contract(
            "GET /purchase-orders/:id",
            ContractDefinition::response_only(purchase_order.clone()),
        )
        .contract(
            "POST /purchase-orders",
            ContractDefinition::new(purchase_order_input(), purchase_order.clone()),
        )
        .contract(
            "PUT /purchase-orders/:id",
            ContractDefinition::new(purchase_order_input(), purchase_order),
        )
        // supplier and vendor bills
        .contract(
            "GET /supplier-bills",
            ContractDefinition::response_only(list_of("supplierBills", supplier_bill.clone())),
        )
        .contract(
            "GET /supplier-bills/number/next",
            ContractDefinition::response_only(next_number()),
        )
        .contract(
            "GET /supplier-bills/:id",
            ContractDefinition::response_only(supplier_bill.clone()),
        )
        .contract(
            "POST /supplier-bills",
            ContractDefinition::new(supplier_bill_input(), supplier_bill.clone()),
        )
        .contract(
            "POST /supplier-bills/:id/approve",
            ContractDefinition::response_only(supplier_bill.clone()),
        )
        .contract(
            "DELETE /supplier-bills/:id",
            ContractDefinition::response_only(deleted()),
        )
        .contract(
            "GET /vendor-bills",
            ContractDefinition::response_only(list_of("vendorBills", supplier_bill.clone())),
        )
        .contract(
            "GET /vendor-bills/:id",
            ContractDefinition::response_only(supplier_bill),
        )
        // advance payments
        .contract(
            "GET /advance-payments",
            ContractDefinition::response_only(list_of("advancePayments", advance_payment.clone())),
        )
        .contract(
            "GET /advance-payments/number/next",
            ContractDefinition::response_only(next_number()),
        )
        .contract(
            "GET /advance-payments/:id",
            ContractDefinition::response_only(advance_payment.clone()),
        )
        .contract(
            "GET /advance-payments/:id/receipt",
            ContractDefinition::response_only(receipt()),
        )
        .contract(
            "POST /advance-payments/:id/cancel",
            ContractDefinition::new(cancellation(), advance_payment),
        )
        // VAT amendments
        .contract(
            "GET /vat-amendments",
            ContractDefinition::response_only(list_of("vatAmendments", vat_amendment.clone())),
        )
        .contract(
            "GET /vat-amendments/pending",
            ContractDefinition::response_only(TypeSchema::array_of(vat_amendment.clone())),
        )
        .contract(
            "GET /vat-amendments/:id",
            ContractDefinition::response_only(vat_amendment.clone()),
        )
        .contract(
            "POST /vat-amendments",
            ContractDefinition::new(vat_amendment_input(), vat_amendment),
        )
        // stock
        .contract(
            "GET /stock-batches/available",
            ContractDefinition::response_only(
                ObjectSchemaBuilder::new()
                    .field("batches", TypeSchema::array_of(stock_batch()))
                    .build(),
            ),
        )
        .build()
}

/// `{ <array_key>: [item], pageInfo?, pagination? }`
fn list_of(array_key: &str, item: TypeSchema) -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field(array_key, TypeSchema::array_of(item))
        .optional("pageInfo", PageInfo::schema())
        .optional("pagination", PageInfo::schema())
        .build()
}

fn id() -> TypeSchema {
    TypeSchema::integer_min(1)
}

fn amount() -> TypeSchema {
    TypeSchema::number_min(0.0)
}

fn date() -> TypeSchema {
    TypeSchema::formatted(StringFormat::Date)
}

fn vat_rate() -> TypeSchema {
    TypeSchema::Number {
        min: Some(0.0),
        max: Some(100.0),
    }
}

fn trn() -> TypeSchema {
    TypeSchema::pattern(r"^\d{15}$")
}

fn line_item() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("productId", id())
        .field("quantity", amount())
        .field("unitPrice", amount())
        .field_schema(
            FieldSchema::new("description", TypeSchema::string())
                .optional()
                .nullable(),
        )
        .optional("vatRate", vat_rate())
        .build()
}

fn invoice() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("invoiceNumber", TypeSchema::non_empty_string())
        .field("customerId", id())
        .field("status", TypeSchema::enumeration(INVOICE_STATUSES))
        .field("invoiceDate", date())
        .nullable("dueDate", date())
        .field("subtotal", amount())
        .field("vatAmount", amount())
        .field("total", amount())
        .optional("items", TypeSchema::array_of(line_item()))
        .build()
}

fn invoice_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("customerId", id())
        .field("invoiceDate", date())
        .optional("dueDate", date())
        .field("items", TypeSchema::array_min(line_item(), 1))
        .optional("notes", TypeSchema::string())
        .build()
}

fn invoice_analytics() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("totalInvoices", TypeSchema::integer_min(0))
        .field("totalRevenue", amount())
        .field("outstandingAmount", amount())
        .optional("byStatus", TypeSchema::object(Vec::new()))
        .build()
}

fn next_number() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("nextNumber", TypeSchema::non_empty_string())
        .build()
}

fn status_change(statuses: &[&str]) -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("status", TypeSchema::enumeration(statuses.iter().copied()))
        .optional("reason", TypeSchema::string())
        .build()
}

fn cancellation() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("reason", TypeSchema::non_empty_string())
        .build()
}

fn deleted() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("success", TypeSchema::Boolean)
        .optional("message", TypeSchema::string())
        .build()
}

fn customer() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("name", TypeSchema::non_empty_string())
        .field_schema(
            FieldSchema::new("email", TypeSchema::formatted(StringFormat::Email))
                .optional()
                .nullable(),
        )
        .field_schema(FieldSchema::new("trnNumber", trn()).optional().nullable())
        .optional("creditLimit", amount())
        .optional("balance", TypeSchema::number())
        .build()
}

fn customer_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("name", TypeSchema::non_empty_string())
        .optional("email", TypeSchema::formatted(StringFormat::Email))
        .optional("phone", TypeSchema::string())
        .optional("trnNumber", trn())
        .optional("creditLimit", amount())
        .build()
}

fn credit_limit_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("creditLimit", amount())
        .optional("reason", TypeSchema::string())
        .build()
}

fn credit_summary() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("customerId", id())
        .field("creditLimit", amount())
        .field("usedCredit", TypeSchema::number())
        .field("availableCredit", TypeSchema::number())
        .build()
}

fn aging_report() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("current", amount())
        .field("days30", amount())
        .field("days60", amount())
        .field("days90", amount())
        .field("over90", amount())
        .build()
}

fn credit_dashboard() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("totalCreditLimit", amount())
        .field("totalOutstanding", amount())
        .field("customersOverLimit", TypeSchema::integer_min(0))
        .build()
}

fn product() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("name", TypeSchema::non_empty_string())
        .optional("sku", TypeSchema::string())
        .optional("category", TypeSchema::string())
        .optional("unit", TypeSchema::string())
        .field("unitPrice", amount())
        .optional("stockQuantity", TypeSchema::number())
        .build()
}

fn product_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("name", TypeSchema::non_empty_string())
        .optional("sku", TypeSchema::string())
        .optional("category", TypeSchema::string())
        .optional("unit", TypeSchema::string())
        .field("unitPrice", amount())
        .build()
}

fn credit_note() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("creditNoteNumber", TypeSchema::non_empty_string())
        .field("invoiceId", id())
        .field("status", TypeSchema::enumeration(NOTE_STATUSES))
        .field("totalCredit", amount())
        .optional("reason", TypeSchema::string())
        .build()
}

fn credit_note_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("invoiceId", id())
        .field("reason", TypeSchema::non_empty_string())
        .field("items", TypeSchema::array_of(line_item()))
        .build()
}

fn debit_note() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("debitNoteNumber", TypeSchema::non_empty_string())
        .field("supplierId", id())
        .field("status", TypeSchema::enumeration(NOTE_STATUSES))
        .field("totalDebit", amount())
        .build()
}

fn allowed_transitions() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("currentStatus", TypeSchema::enumeration(NOTE_STATUSES))
        .field(
            "allowedTransitions",
            TypeSchema::array_of(TypeSchema::enumeration(NOTE_STATUSES)),
        )
        .build()
}

fn delivery_note() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("deliveryNoteNumber", TypeSchema::non_empty_string())
        .field("customerId", id())
        .field("status", TypeSchema::enumeration(DELIVERY_STATUSES))
        .optional("deliveryDate", date())
        .build()
}

fn delivery_note_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("customerId", id())
        .optional("invoiceId", id())
        .field("deliveryDate", date())
        .field("items", TypeSchema::array_of(line_item()))
        .build()
}

fn purchase_order() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("poNumber", TypeSchema::non_empty_string())
        .field("supplierId", id())
        .field("status", TypeSchema::enumeration(ORDER_STATUSES))
        .field("total", amount())
        .build()
}

fn purchase_order_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("supplierId", id())
        .field("orderDate", date())
        .optional("expectedDeliveryDate", date())
        .field("items", TypeSchema::array_of(line_item()))
        .build()
}

fn supplier_bill() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("billNumber", TypeSchema::non_empty_string())
        .field("supplierId", id())
        .field("status", TypeSchema::enumeration(ORDER_STATUSES))
        .field("billDate", date())
        .field("total", amount())
        .build()
}

fn supplier_bill_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("supplierId", id())
        .field("billDate", date())
        .optional("purchaseOrderId", id())
        .field("items", TypeSchema::array_of(line_item()))
        .build()
}

fn advance_payment() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("receiptNumber", TypeSchema::non_empty_string())
        .field("customerId", id())
        .field("amount", amount())
        .field("paymentDate", date())
        .field(
            "paymentMethod",
            TypeSchema::enumeration(["cash", "cheque", "bank_transfer", "card"]),
        )
        .optional("allocatedAmount", amount())
        .build()
}

fn receipt() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("receiptNumber", TypeSchema::non_empty_string())
        .field("amount", amount())
        .optional("amountInWords", TypeSchema::string())
        .build()
}

fn vat_amendment() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("originalPeriod", TypeSchema::pattern(r"^\d{4}-(0[1-9]|1[0-2])$"))
        .field("status", TypeSchema::enumeration(NOTE_STATUSES))
        .field("adjustmentAmount", TypeSchema::number())
        .optional("penaltyAmount", amount())
        .build()
}

fn vat_amendment_input() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("originalPeriod", TypeSchema::pattern(r"^\d{4}-(0[1-9]|1[0-2])$"))
        .field("reason", TypeSchema::non_empty_string())
        .field("adjustmentAmount", TypeSchema::number())
        .build()
}

fn stock_batch() -> TypeSchema {
    ObjectSchemaBuilder::new()
        .field("id", id())
        .field("productId", id())
        .field("batchNumber", TypeSchema::non_empty_string())
        .field("quantityRemaining", amount())
        .field("unitCost", amount())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_contracts_core::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_erp_tables_build() {
        let contracts = erp_contracts().unwrap();
        let envelopes = erp_envelopes().unwrap();

        assert!(contracts.len() > 50);
        assert_eq!(envelopes.len(), LIST_ENVELOPES.len());
    }

    #[test]
    fn test_every_list_envelope_has_a_contract() {
        let contracts = erp_contracts().unwrap();
        for (prefix, _, _) in LIST_ENVELOPES {
            assert!(
                contracts.find("GET", prefix).is_some(),
                "no GET contract for {prefix}"
            );
        }
    }

    #[test]
    fn test_invoice_list_schema() {
        let contracts = erp_contracts().unwrap();
        let list = contracts.find("GET", "/api/invoices?page=1").unwrap();

        let body = json!({
            "invoices": [{
                "id": 7,
                "invoiceNumber": "INV-2024-0007",
                "customerId": 3,
                "status": "issued",
                "invoiceDate": "2024-03-01",
                "dueDate": null,
                "subtotal": 1000,
                "vatAmount": 50,
                "total": 1050
            }],
            "pageInfo": {"currentPage": 1, "perPage": 10, "totalItems": 1, "totalPages": 1}
        });
        assert_eq!(list.response.validate(&body), Ok(()));

        let drifted = json!({
            "invoices": [],
            "pageInfo": {"currentPage": 1, "perPage": 10, "total": 1, "totalPages": 1}
        });
        let issues = list.response.validate(&drifted).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$.pageInfo.totalItems");
    }

    #[test]
    fn test_invoice_create_requires_items() {
        let contracts = erp_contracts().unwrap();
        let create = contracts.find("POST", "/invoices").unwrap();

        let payload = json!({"customerId": 3, "invoiceDate": "2024-03-01", "items": []});
        let issues = create.request.validate(&payload).unwrap_err();
        assert_eq!(issues[0].path, "$.items");
    }

    #[test]
    fn test_customer_trn_format() {
        let contracts = erp_contracts().unwrap();
        let update = contracts.find("PUT", "/customers/12").unwrap();

        assert!(
            update
                .request
                .validate(&json!({"name": "Gulf Steel LLC", "trnNumber": "100123456700003"}))
                .is_ok()
        );
        assert!(
            update
                .request
                .validate(&json!({"name": "Gulf Steel LLC", "trnNumber": "TRN-1"}))
                .is_err()
        );
    }
}
