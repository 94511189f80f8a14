//! Gist CRUD endpoints.

use reqwest::StatusCode;

use super::*;

impl GistGateway for RemoteClient {
    fn list(&self, token: &str) -> Result<Vec<Gist>, GistError> {
        const ACTION: &str = "Failed to fetch gists";
        tracing::debug!("GET /gists");
        let req = self.authed(self.client.get(self.url("/gists")), token);
        let resp = self.send(req, ACTION)?;
        let resp = self.ensure_ok(resp, ACTION)?;
        self.parse(resp, ACTION)
    }

    fn get_detail(&self, token: &str, id: &str) -> Result<Gist, GistError> {
        const ACTION: &str = "Failed to fetch gist details";
        tracing::debug!(id, "GET /gists/{{id}}");
        let req = self.authed(self.client.get(self.url(&format!("/gists/{}", id))), token);
        let resp = self.send(req, ACTION)?;
        let resp = self.ensure_ok(resp, ACTION)?;
        self.parse(resp, ACTION)
    }

    fn create(&self, token: &str, gist: &NewGist) -> Result<Gist, GistError> {
        const ACTION: &str = "Failed to create gist";
        tracing::debug!(files = gist.files.len(), "POST /gists");
        let req = self
            .authed(self.client.post(self.url("/gists")), token)
            .json(gist);
        let resp = self.send(req, ACTION)?;
        let resp = self.ensure_ok(resp, ACTION)?;
        self.parse(resp, ACTION)
    }

    fn update(&self, token: &str, id: &str, patch: &GistPatch) -> Result<Gist, GistError> {
        const ACTION: &str = "Failed to update gist";
        tracing::debug!(id, "PATCH /gists/{{id}}");
        let req = self
            .authed(self.client.patch(self.url(&format!("/gists/{}", id))), token)
            .json(patch);
        let resp = self.send(req, ACTION)?;

        if resp.status() == StatusCode::FORBIDDEN {
            return Err(GistError::Permission);
        }
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(GistError::NotFound);
        }

        let resp = self.ensure_ok(resp, ACTION)?;
        self.parse(resp, ACTION)
    }

    fn delete(&self, token: &str, id: &str) -> Result<(), GistError> {
        const ACTION: &str = "Failed to delete gist";
        tracing::debug!(id, "DELETE /gists/{{id}}");
        let req = self.authed(self.client.delete(self.url(&format!("/gists/{}", id))), token);
        let resp = self.send(req, ACTION)?;
        let _ = self.ensure_ok(resp, ACTION)?;
        Ok(())
    }
}
