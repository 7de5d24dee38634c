//! Business information form bound to the quote store.
//!
//! The form owns the field values as typed, normalizes them on entry, and
//! pushes the full editable set into the store on every edit. Validation
//! messages surface per field, and only for fields the user has visited,
//! so a fresh form does not open covered in errors.
//!
//! Repopulation runs the other way: a store subscription copies the
//! current quote's business section back into the fields on every
//! emission, without marking anything touched. Loading a quote for
//! editing therefore never produces spurious errors.
//!
//! Lock discipline: the field lock is never held across a store call.
//! Store notifications are synchronous, and one of the subscribers is the
//! form's own repopulation callback.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use domain_quote::{
    normalize_state, BusinessField, BusinessInfoUpdate, BusinessInfoValidator, BusinessType,
    Industry, QuoteStore, Subscription, ValidationResult,
};

#[derive(Default)]
struct FieldState {
    name: String,
    business_type: Option<BusinessType>,
    industry: Option<Industry>,
    state: String,
    touched: HashSet<BusinessField>,
}

impl FieldState {
    fn as_update(&self) -> BusinessInfoUpdate {
        BusinessInfoUpdate {
            name: self.name.clone(),
            business_type: self.business_type,
            industry: self.industry,
            state: self.state.clone(),
        }
    }
}

/// The business information form: field values, touched flags, and live
/// per-field validation over the current quote.
pub struct BusinessInfoForm {
    store: QuoteStore,
    fields: Arc<Mutex<FieldState>>,
    _subscription: Subscription,
}

impl BusinessInfoForm {
    /// Binds a form to the store. The form picks up the current quote
    /// immediately and repopulates on every emission.
    pub fn bind(store: &QuoteStore) -> Self {
        let fields = Arc::new(Mutex::new(FieldState::default()));

        let observed = Arc::clone(&fields);
        let subscription = store.subscribe(move |quote| {
            let mut fields = observed.lock().unwrap_or_else(PoisonError::into_inner);
            match quote {
                Some(quote) => {
                    let info = &quote.business_information;
                    fields.name = info.name.clone();
                    fields.business_type = info.business_type;
                    fields.industry = info.industry;
                    fields.state = info.state.clone();
                }
                None => {
                    fields.name.clear();
                    fields.business_type = None;
                    fields.industry = None;
                    fields.state.clear();
                }
            }
        });

        Self {
            store: store.clone(),
            fields,
            _subscription: subscription,
        }
    }

    // ========================================================================
    // Field Setters
    // ========================================================================

    /// Sets the business name as typed.
    pub fn set_name(&self, raw: &str) {
        let update = {
            let mut fields = self.lock_fields();
            fields.name = raw.to_string();
            fields.as_update()
        };
        self.store.update_business_info(update);
    }

    /// Selects or clears the business type.
    pub fn set_business_type(&self, value: Option<BusinessType>) {
        let update = {
            let mut fields = self.lock_fields();
            fields.business_type = value;
            fields.as_update()
        };
        self.store.update_business_info(update);
    }

    /// Selects or clears the industry.
    pub fn set_industry(&self, value: Option<Industry>) {
        let update = {
            let mut fields = self.lock_fields();
            fields.industry = value;
            fields.as_update()
        };
        self.store.update_business_info(update);
    }

    /// Sets the state code, normalized as typed: at most the first two
    /// characters, uppercased.
    pub fn set_state(&self, raw: &str) {
        let update = {
            let mut fields = self.lock_fields();
            fields.state = normalize_state(raw);
            fields.as_update()
        };
        self.store.update_business_info(update);
    }

    // ========================================================================
    // Touched Tracking
    // ========================================================================

    /// Marks a field as visited; its validation message becomes visible.
    pub fn touch(&self, field: BusinessField) {
        self.lock_fields().touched.insert(field);
    }

    /// Marks every field as visited, as a save attempt does.
    pub fn touch_all(&self) {
        let mut fields = self.lock_fields();
        for field in BusinessField::ALL {
            fields.touched.insert(field);
        }
    }

    /// Clears every touched flag, returning the form to its pristine look.
    pub fn reset_touched(&self) {
        self.lock_fields().touched.clear();
    }

    /// Whether the field has been visited.
    pub fn is_touched(&self, field: BusinessField) -> bool {
        self.lock_fields().touched.contains(&field)
    }

    // ========================================================================
    // Validation Surface
    // ========================================================================

    /// The validation message for a field, or `None` while the field is
    /// untouched or valid.
    pub fn field_error(&self, field: BusinessField) -> Option<String> {
        let fields = self.lock_fields();
        if !fields.touched.contains(&field) {
            return None;
        }
        BusinessInfoValidator::field_error(field, &fields.as_update())
    }

    /// Every visible validation message, in form field order.
    pub fn visible_errors(&self) -> Vec<String> {
        let fields = self.lock_fields();
        let update = fields.as_update();
        BusinessField::ALL
            .into_iter()
            .filter(|field| fields.touched.contains(field))
            .filter_map(|field| BusinessInfoValidator::field_error(field, &update))
            .collect()
    }

    /// Validates the full field set, touched or not.
    pub fn validate(&self) -> ValidationResult {
        BusinessInfoValidator::validate(&self.snapshot())
    }

    /// Snapshot of the editable fields as currently held by the form.
    pub fn snapshot(&self) -> BusinessInfoUpdate {
        self.lock_fields().as_update()
    }

    // ========================================================================
    // Field Accessors
    // ========================================================================

    /// The business name as currently typed.
    pub fn name(&self) -> String {
        self.lock_fields().name.clone()
    }

    /// The selected business type, if any.
    pub fn business_type(&self) -> Option<BusinessType> {
        self.lock_fields().business_type
    }

    /// The selected industry, if any.
    pub fn industry(&self) -> Option<Industry> {
        self.lock_fields().industry
    }

    /// The state code as currently held, already normalized.
    pub fn state(&self) -> String {
        self.lock_fields().state.clone()
    }

    fn lock_fields(&self) -> MutexGuard<'_, FieldState> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BusinessInfoForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.lock_fields();
        f.debug_struct("BusinessInfoForm")
            .field("name", &fields.name)
            .field("state", &fields.state)
            .field("touched", &fields.touched.len())
            .finish()
    }
}
