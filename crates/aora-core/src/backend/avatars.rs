use super::{AppwriteClient, BackendResult};

impl AppwriteClient {
    /// URL of an avatar image rendered from the initials of `name`.
    pub fn initials_url(&self, name: &str) -> BackendResult<String> {
        self.resource_url("/avatars/initials", &[("name", name.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_url_encodes_name() {
        let client = AppwriteClient::new("https://cloud.appwrite.io/v1", "proj", "com.jsm.aora");
        assert_eq!(
            client.initials_url("ana maría").unwrap(),
            "https://cloud.appwrite.io/v1/avatars/initials?name=ana+mar%C3%ADa&project=proj"
        );
    }
}
