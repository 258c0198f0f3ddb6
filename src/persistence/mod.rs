use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::CardioError;

const APP_NAME: &str = "cardioscope";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json_to<T: Serialize>(data: &T, file_path: &Path) -> Result<(), CardioError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    log::info!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json_from<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, CardioError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::info!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json_from::<T>(&get_data_file_path(filename)) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cardioscope_{}_{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn test_round_trip_and_missing_file() {
        let path = temp_file("sample.json");
        assert_eq!(load_json_from::<Sample>(&path).unwrap(), Sample::default());

        let sample = Sample { name: "vitals".to_string(), count: 3 };
        save_json_to(&sample, &path).unwrap();
        assert_eq!(load_json_from::<Sample>(&path).unwrap(), sample);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_file("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_json_from::<Sample>(&path), Err(CardioError::Json(_))));
        let _ = fs::remove_file(&path);
    }
}
