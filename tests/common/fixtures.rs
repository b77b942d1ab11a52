//! On-disk data directory fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const USERS_CSV: &str = "\
user_id,user_cluster,digital_literacy,age_group,risk_profile,preferred_topic
1,4,3,26-35,medium,phishing
2,3,2,65+,high,romance_scam
3,5,4,18-25,low,malware
";

pub const MODULES_CSV: &str = "\
module_id,scam_type,difficulty,target_literacy,duration_min
1,phishing,2,3,5
2,romance_scam,5,1,30
3,phishing,3,3,10
4,malware,1,5,45
5,investment_fraud,3,3,6
";

pub const RATINGS_CSV: &str = "\
user_id,module_id,rating
1,3,4
1,4,2
3,4,5
";

/// Factor model covering users 1 and 3 and every module.
pub const MODEL_JSON: &str = r#"{
  "global_mean": 3.0,
  "users": {
    "1": { "bias": 0.5, "factors": [1.0, 0.0] },
    "3": { "bias": -0.5, "factors": [0.0, 1.0] }
  },
  "modules": {
    "1": { "bias": 0.0, "factors": [0.2, 0.1] },
    "2": { "bias": 0.0, "factors": [1.4, -0.5] },
    "3": { "bias": 0.2, "factors": [0.1, 0.1] },
    "4": { "bias": -0.2, "factors": [-0.5, 1.5] },
    "5": { "bias": 0.0, "factors": [0.0, 0.0] }
  }
}"#;

/// A temporary data directory seeded with the CSV catalogs.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    /// Users, modules and ratings.
    pub fn seeded() -> Self {
        let data = Self::empty();
        data.write("users.csv", USERS_CSV);
        data.write("modules.csv", MODULES_CSV);
        data.write("ratings.csv", RATINGS_CSV);
        data
    }

    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn with_model(&self) -> PathBuf {
        self.write("model.json", MODEL_JSON)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("read fixture file")
    }
}
