use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    core::{
        AnswerRecord,
        CardioError,
        PredictionOutcome,
    },
    gui::settings::SettingsData,
    persistence::{
        get_data_file_path,
        save_json_to,
    },
    predictor::PredictorClient,
};

/// Runs blocking and async work off the UI thread. Results come back through
/// a channel drained once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    settings_writer: mpsc::Sender<SettingsData>,
}

impl TaskManager {
    pub fn new() -> Result<Self, CardioError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        let (settings_writer, snapshots) = mpsc::channel();
        let path = get_data_file_path(SettingsData::FILE_NAME);
        let results = sender.clone();
        thread::spawn(move || run_settings_writer(path, snapshots, results));

        Ok(Self { runtime, receiver, sender, settings_writer })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// The caller guarantees there is no other prediction in flight.
    pub fn submit_prediction(
        &self,
        client: PredictorClient,
        answers: AnswerRecord,
        ctx: eframe::egui::Context,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async { client.predict(&answers).await });

            let task_result = match result {
                Ok(payload) => {
                    log::info!("Prediction response received");
                    TaskResult::Prediction { outcome: PredictionOutcome::from_json(payload), error: None }
                }
                Err(e) => {
                    log::error!("Prediction request failed: {}", e);
                    TaskResult::Prediction {
                        outcome: PredictionOutcome::failed(e.to_string()),
                        error: Some(e.to_string()),
                    }
                }
            };

            let _ = sender.send(task_result);
            ctx.request_repaint();
        });
    }

    /// Queued on the single settings writer, so saves land in call order.
    pub fn save_settings(&self, settings: SettingsData) {
        if self.settings_writer.send(settings).is_err() {
            log::error!("Settings writer has stopped; settings not saved");
        }
    }
}

/// Writes snapshots one at a time until every sender is gone. A backlog is
/// collapsed to its newest snapshot.
fn run_settings_writer(
    path: PathBuf,
    snapshots: mpsc::Receiver<SettingsData>,
    results: mpsc::Sender<TaskResult>,
) {
    while let Ok(mut latest) = snapshots.recv() {
        while let Ok(newer) = snapshots.try_recv() {
            latest = newer;
        }

        let result = save_json_to(&latest, &path).map_err(|e| e.to_string());
        let _ = results.send(TaskResult::SettingsSaved(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_drains_channel() {
        let mut manager = TaskManager::new().unwrap();
        let (sender, _) = manager.task_context();
        sender.send(TaskResult::SettingsSaved(Ok(()))).unwrap();
        sender
            .send(TaskResult::Prediction { outcome: PredictionOutcome::from_json(None), error: None })
            .unwrap();

        let results = manager.poll_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].task_type(), "settings_saved");
        assert_eq!(results[1].task_type(), "prediction");
        assert!(manager.poll_results().is_empty());
    }

    #[test]
    fn test_settings_writer_keeps_newest_snapshot() {
        let path = std::env::temp_dir()
            .join(format!("cardioscope_{}_settings.json", uuid::Uuid::new_v4()));
        let (snapshots_tx, snapshots) = mpsc::channel();
        let (results, results_rx) = mpsc::channel();

        for dark_mode in [true, false, true, false] {
            snapshots_tx.send(SettingsData { dark_mode, ..SettingsData::default() }).unwrap();
        }
        drop(snapshots_tx);

        run_settings_writer(path.clone(), snapshots, results);

        let saved: SettingsData = crate::persistence::load_json_from(&path).unwrap();
        assert!(!saved.dark_mode);
        assert!(results_rx
            .try_iter()
            .all(|result| matches!(result, TaskResult::SettingsSaved(Ok(())))));

        let _ = std::fs::remove_file(&path);
    }
}
