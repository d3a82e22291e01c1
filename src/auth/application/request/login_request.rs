use url::form_urlencoded;

/// Body of `POST /access/ticket`.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub realm: String,
}

impl LoginRequest {
    /// Encodes the request as `application/x-www-form-urlencoded`.
    pub fn to_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("username", &self.username)
            .append_pair("password", &self.password)
            .append_pair("realm", &self.realm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_form_encodes_values() {
        let request = LoginRequest {
            username: "root".to_string(),
            password: "p@ss word&more".to_string(),
            realm: "pam".to_string(),
        };
        assert_eq!(
            request.to_form(),
            "username=root&password=p%40ss+word%26more&realm=pam"
        );
    }
}
