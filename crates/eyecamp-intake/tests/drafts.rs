use std::sync::Arc;

use eyecamp_core::error::{HandoffError, StoreError};
use eyecamp_core::keys;
use eyecamp_core::models::{PatientRecord, SectionId};
use eyecamp_core::sink::RecordSink;
use eyecamp_core::store::{FileStore, LocalStore, MemoryStore};
use eyecamp_intake::draft::{DraftSlot, DraftStore};
use eyecamp_intake::engine::{IntakeForm, IntakeMode};
use eyecamp_intake::error::IntakeError;

struct NullSink;

impl RecordSink for NullSink {
    fn accept(&self, _record: &PatientRecord) -> Result<(), HandoffError> {
        Ok(())
    }
}

fn new_form(store: Arc<dyn LocalStore>, slot: DraftSlot, camp: &str) -> IntakeForm {
    IntakeForm::new(
        camp,
        IntakeMode::Tabbed,
        DraftStore::new(store, slot),
        Arc::new(NullSink),
    )
}

#[test]
fn draft_round_trip_preserves_every_field() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mut form = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");

    form.set_field("name", "Meena Devi").unwrap();
    form.set_field("age", "062").unwrap();
    form.set_field("sex", "female").unwrap();
    form.set_field("nearVisionLeft", "N8/40").unwrap();
    form.set_field("acceptanceRightSph", "2.25").unwrap();
    form.set_field("acceptanceRightSphPositive", false).unwrap();
    form.set_field("addGivenLeftRefractionNote", "reading only").unwrap();
    form.go_to(SectionId::Refraction).unwrap();

    let key = form.save_draft().unwrap();
    assert_eq!(key, keys::draft("camp-1", form.record().id));

    let draft = form.load_draft(&key).unwrap().expect("draft was saved");
    assert_eq!(&draft.data, form.record());
    assert_eq!(draft.camp_id, "camp-1");
    assert!(draft.patient_id.is_some());
    assert_eq!(draft.patient_id, form.record().id);
    assert_eq!(draft.active_section, SectionId::Refraction);

    // Unset fields come back as empty strings, not missing.
    let raw: serde_json::Value = serde_json::from_str(&store.get(&key).unwrap().unwrap()).unwrap();
    assert_eq!(raw["data"]["history"], "");
    assert_eq!(raw["data"]["outcome"], "");

    let resumed = IntakeForm::resume(
        draft,
        IntakeMode::Tabbed,
        DraftStore::new(store, DraftSlot::PerRecord),
        Arc::new(NullSink),
    );
    assert_eq!(resumed.record(), form.record());
    assert_eq!(resumed.active_section(), SectionId::Refraction);
    assert!(resumed.is_complete(SectionId::Demographics));
    assert!(resumed.is_complete(SectionId::Vision));
}

#[test]
fn missing_draft_loads_as_none() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let form = new_form(store, DraftSlot::PerRecord, "camp-1");
    assert!(form.load_draft("drafts/camp-9/new").unwrap().is_none());
}

#[test]
fn per_record_slots_do_not_collide_within_a_camp() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mut a = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");
    let mut b = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");
    a.set_field("name", "Asha").unwrap();
    b.set_field("name", "Bala").unwrap();

    let key_a = a.save_draft().unwrap();
    let key_b = b.save_draft().unwrap();
    assert_ne!(key_a, key_b);
    assert_eq!(a.load_draft(&key_a).unwrap().unwrap().data.name, "Asha");
    assert_eq!(a.load_draft(&key_b).unwrap().unwrap().data.name, "Bala");
}

#[test]
fn per_record_slots_are_separate_across_camps() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mut a = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");
    let mut b = new_form(store.clone(), DraftSlot::PerRecord, "camp-2");
    a.set_field("name", "Asha").unwrap();
    b.set_field("name", "Bala").unwrap();

    let key_a = a.save_draft().unwrap();
    let key_b = b.save_draft().unwrap();
    assert!(key_a.starts_with("drafts/camp-1/"));
    assert!(key_b.starts_with("drafts/camp-2/"));
}

#[test]
fn submitting_one_patient_keeps_another_patients_draft() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mut a = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");
    let mut b = new_form(store.clone(), DraftSlot::PerRecord, "camp-1");
    a.set_field("name", "Asha").unwrap();
    let key_a = a.save_draft().unwrap();

    b.set_field("name", "Bala").unwrap();
    b.set_field("age", "30").unwrap();
    b.set_field("sex", "male").unwrap();
    b.set_field("outcome", "normal").unwrap();
    let key_b = b.save_draft().unwrap();
    b.submit().unwrap();

    assert!(store.get(&key_b).unwrap().is_none());
    let kept = a.load_draft(&key_a).unwrap().expect("other draft survives");
    assert_eq!(kept.data.name, "Asha");
}

#[test]
fn shared_slot_keeps_only_the_latest_draft() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mut a = new_form(store.clone(), DraftSlot::Shared, "camp-1");
    let mut b = new_form(store.clone(), DraftSlot::Shared, "camp-2");
    a.set_field("name", "Asha").unwrap();
    b.set_field("name", "Bala").unwrap();

    let key_a = a.save_draft().unwrap();
    let key_b = b.save_draft().unwrap();
    assert_eq!(key_a, keys::SHARED_DRAFT);
    assert_eq!(key_a, key_b);

    let draft = a.load_draft(keys::SHARED_DRAFT).unwrap().unwrap();
    assert_eq!(draft.camp_id, "camp-2");
    assert_eq!(draft.data.name, "Bala");
}

#[test]
fn save_failure_is_reported_and_editing_continues() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::with_quota(64));
    let mut form = new_form(store, DraftSlot::PerRecord, "camp-1");
    form.set_field("name", "Rajesh Kumar").unwrap();

    let err = form.save_draft().unwrap_err();
    assert!(matches!(
        err,
        IntakeError::Store(StoreError::QuotaExceeded { .. })
    ));

    form.set_field("age", "45").unwrap();
    assert_eq!(form.record().name, "Rajesh Kumar");
    assert_eq!(form.record().age, "45");
}

#[test]
fn drafts_survive_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::new(dir.path()));
    let mut form = new_form(store, DraftSlot::PerRecord, "camp-1");
    form.set_field("name", "Rajesh Kumar").unwrap();
    let key = form.save_draft().unwrap();

    let reopened: Arc<dyn LocalStore> = Arc::new(FileStore::new(dir.path()));
    let drafts = DraftStore::new(reopened, DraftSlot::PerRecord);
    let draft = drafts.load(&key).unwrap().unwrap();
    assert_eq!(draft.data.name, "Rajesh Kumar");
}
