//! Built-in sample records shown by the admin table in demo mode when the
//! listing call fails.

use chrono::DateTime;
use visitcard_core::record::{ContactRecord, ImageRef, RecordId};

const IMAGE_HOST: &str = "https://res.cloudinary.com/dsxfg3jdt/image/upload";

fn image(version: u64, folder: &str, stem: &str, id: &str, ext: &str) -> Option<ImageRef> {
  Some(ImageRef {
    url: format!("{IMAGE_HOST}/v{version}/visiting-cards/{folder}/{stem}_{id}.{ext}"),
  })
}

/// The fixed sample dataset, newest first.
pub fn sample_records() -> Vec<ContactRecord> {
  vec![
    ContactRecord {
      id:            RecordId::new("684b00b16a00cc30f3dc01aa"),
      name:          "Yash".into(),
      designation:   Some("Data Management Analyst".into()),
      company:       Some("testing".into()),
      tagline:       Some("testing is key".into()),
      phone:         "9096842842".into(),
      email:         "choudhariyash@gmail.com".into(),
      address:       "Hamal Mapde".into(),
      linkedin:      None,
      instagram:     None,
      youtube:       None,
      whatsapp:      None,
      directions:    None,
      profile_image: image(1749745857, "profiles", "profile", "684b00b16a00cc30f3dc01aa", "jpg"),
      company_logo:  image(1749745859, "logos", "logo", "684b00b16a00cc30f3dc01aa", "png"),
      qr_code:       image(1749745860, "qr-codes", "qr", "684b00b16a00cc30f3dc01aa", "png"),
      visit_count:   0,
      created_at:    DateTime::from_timestamp_millis(1_749_745_841_406).unwrap_or_default(),
    },
    ContactRecord {
      id:            RecordId::new("684affba6a00cc30f3dc01a5"),
      name:          "test user".into(),
      designation:   Some("tester".into()),
      company:       Some("testing".into()),
      tagline:       Some("testing is key".into()),
      phone:         "7894561230".into(),
      email:         "test@gmail.com".into(),
      address:       "Hamal Mapde".into(),
      linkedin:      None,
      instagram:     None,
      youtube:       None,
      whatsapp:      None,
      directions:    None,
      profile_image: image(1749745605, "profiles", "profile", "684affba6a00cc30f3dc01a5", "jpg"),
      company_logo:  image(1749745607, "logos", "logo", "684affba6a00cc30f3dc01a5", "png"),
      qr_code:       image(1749745608, "qr-codes", "qr", "684affba6a00cc30f3dc01a5", "png"),
      visit_count:   0,
      created_at:    DateTime::from_timestamp_millis(1_749_745_594_845).unwrap_or_default(),
    },
    ContactRecord {
      id:            RecordId::new("684aefe36a00cc30f3dc019e"),
      name:          "John Does".into(),
      designation:   Some("Software Engineer".into()),
      company:       Some("Tech Corp".into()),
      tagline:       Some("Innovating the future".into()),
      phone:         "9876543210".into(),
      email:         "john.doe@example.com".into(),
      address:       "123 Main Street".into(),
      linkedin:      Some("https://linkedin.com/in/johndoe".into()),
      instagram:     Some("https://instagram.com/johndoe".into()),
      youtube:       None,
      whatsapp:      None,
      directions:    None,
      profile_image: image(1749744064, "profiles", "profile", "684aefe36a00cc30f3dc019e", "png"),
      company_logo:  image(1749744067, "logos", "logo", "684aefe36a00cc30f3dc019e", "png"),
      qr_code:       image(1749741552, "qr-codes", "qr", "684aefe36a00cc30f3dc019e", "png"),
      visit_count:   0,
      created_at:    DateTime::from_timestamp_millis(1_749_741_539_920).unwrap_or_default(),
    },
  ]
}
