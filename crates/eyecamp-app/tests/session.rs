use std::sync::{Arc, Mutex};

use eyecamp_app::config::AppConfig;
use eyecamp_app::session::Session;
use eyecamp_core::models::SectionId;
use eyecamp_intake::draft::DraftSlot;
use eyecamp_intake::engine::IntakeMode;
use eyecamp_sync::columns::CampResources;
use eyecamp_sync::credentials::DriveCredentials;
use eyecamp_sync::error::SyncError;
use eyecamp_sync::writer::{BoxFuture, SheetUpdate, SheetWriter};

#[derive(Default)]
struct RecordingWriter {
    updates: Mutex<Vec<SheetUpdate>>,
}

impl SheetWriter for RecordingWriter {
    fn update_values(&self, update: SheetUpdate) -> BoxFuture<'_, Result<(), SyncError>> {
        Box::pin(async move {
            self.updates.lock().unwrap().push(update);
            Ok(())
        })
    }
}

fn config(dir: &std::path::Path, slot: DraftSlot) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        draft_slot: slot,
        intake_mode: IntakeMode::Wizard,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn submitted_patient_reaches_the_spreadsheet() {
    let dir = tempfile::tempdir().unwrap();
    let writer = Arc::new(RecordingWriter::default());
    let session =
        Session::with_writer(config(dir.path(), DraftSlot::PerRecord), writer.clone()).unwrap();

    let mut form = session.start_intake("camp-1");
    form.set_field("name", "Rajesh Kumar").unwrap();
    form.set_field("age", "45").unwrap();
    form.set_field("sex", "male").unwrap();
    form.set_field("rightEyeSph", "1.50").unwrap();
    form.set_field("rightEyeCyl", "0.50").unwrap();
    form.set_field("rightEyeAxis", "90").unwrap();
    form.set_field("outcome", "glasses").unwrap();
    let record = form.submit().unwrap();

    let sync = session.sync();
    assert_eq!(sync.camp_records("camp-1").unwrap(), vec![record]);
    assert_eq!(sync.pending().len(), 1);

    // Offline until credentials arrive.
    assert!(session.sync_pending().await.skipped);

    sync.set_credentials(DriveCredentials::issued_at("token", 3600, jiff::Timestamp::now()))
        .unwrap();
    sync.register_camp(
        "camp-1",
        CampResources {
            spreadsheet_id: "sheet-1".to_string(),
            ..CampResources::default()
        },
    )
    .unwrap();

    let report = session.sync_pending().await;
    assert_eq!(report.delivered, vec!["camp-1".to_string()]);

    let updates = writer.updates.lock().unwrap();
    assert_eq!(updates[0].rows[0][1], "Rajesh Kumar");
    assert_eq!(updates[0].rows[0][7], "+1.50DS/-0.50DCx90");
}

#[test]
fn drafts_resume_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let key = {
        let session = Session::with_writer(
            config(dir.path(), DraftSlot::Shared),
            Arc::new(RecordingWriter::default()),
        )
        .unwrap();
        let mut form = session.start_intake("camp-1");
        form.set_field("name", "Meena Devi").unwrap();
        form.set_field("age", "62").unwrap();
        form.set_field("sex", "female").unwrap();
        form.advance().unwrap();
        form.save_draft().unwrap()
    };
    assert_eq!(key, "patientFormData");

    let session = Session::with_writer(
        config(dir.path(), DraftSlot::Shared),
        Arc::new(RecordingWriter::default()),
    )
    .unwrap();
    let form = session.resume_intake(&key).unwrap().unwrap();
    assert_eq!(form.record().name, "Meena Devi");
    assert_eq!(form.active_section(), SectionId::History);

    assert!(session.resume_intake("drafts/camp-1/new").unwrap().is_none());
}
