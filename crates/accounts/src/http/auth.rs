// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2025 Rulesdesk Developers. All rights reserved.
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Login and one-time-password flows.

use super::{
    client::AccountsHttpClient,
    error::AccountsHttpError,
    models::{
        AccessTokenData, ApiResponse, LoginUserDto, MessageData, SendOtpEmailRequest,
        SendOtpMobileRequest, VerifyOtpEmailRequest, VerifyOtpMobileRequest,
    },
};
use crate::common::consts::{
    ACCESS_TOKEN_KEY, ENDPOINT_LOGIN, ENDPOINT_SEND_OTP_EMAIL, ENDPOINT_SEND_OTP_MOBILE,
    ENDPOINT_VERIFY_OTP_EMAIL, ENDPOINT_VERIFY_OTP_MOBILE,
};

/// Provides the authentication endpoints of the accounts backend.
#[derive(Debug, Clone)]
pub struct LoginService {
    client: AccountsHttpClient,
}

impl LoginService {
    /// Creates a new [`LoginService`] sending through `client`.
    #[must_use]
    pub fn new(client: AccountsHttpClient) -> Self {
        Self { client }
    }

    /// Persists `access_token` as the session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    pub fn set_access_token(&self, access_token: &str) -> Result<(), AccountsHttpError> {
        self.client
            .store()
            .set(ACCESS_TOKEN_KEY, access_token)
            .map_err(|e| AccountsHttpError::StoreError(e.to_string()))
    }

    /// Returns the persisted session token, if any.
    #[must_use]
    pub fn get_access_token(&self) -> Option<String> {
        self.client.access_token()
    }

    /// Removes the persisted session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    pub fn clear_access_token(&self) -> Result<(), AccountsHttpError> {
        self.client
            .store()
            .remove(ACCESS_TOKEN_KEY)
            .map_err(|e| AccountsHttpError::StoreError(e.to_string()))
    }

    /// Requests an OTP to be sent to `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send_otp_email(
        &self,
        email: &str,
    ) -> Result<ApiResponse<MessageData>, AccountsHttpError> {
        self.client
            .post(ENDPOINT_SEND_OTP_EMAIL, &SendOtpEmailRequest { email })
            .await
    }

    /// Requests an OTP to be sent to `mobile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn send_otp_mobile(
        &self,
        mobile: &str,
    ) -> Result<ApiResponse<MessageData>, AccountsHttpError> {
        self.client
            .post(ENDPOINT_SEND_OTP_MOBILE, &SendOtpMobileRequest { mobile })
            .await
    }

    /// Verifies the `otp` sent to `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn verify_otp_email(
        &self,
        email: &str,
        otp: &str,
    ) -> Result<ApiResponse<MessageData>, AccountsHttpError> {
        self.client
            .post(ENDPOINT_VERIFY_OTP_EMAIL, &VerifyOtpEmailRequest { email, otp })
            .await
    }

    /// Verifies the `otp` sent to `mobile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn verify_otp_mobile(
        &self,
        mobile: &str,
        otp: &str,
    ) -> Result<ApiResponse<MessageData>, AccountsHttpError> {
        self.client
            .post(ENDPOINT_VERIFY_OTP_MOBILE, &VerifyOtpMobileRequest { mobile, otp })
            .await
    }

    /// Logs in with `login_user_dto`.
    ///
    /// When the response carries `data.access_token`, it is persisted and sent as
    /// `Authorization: Bearer <token>` on every subsequent request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects it, or the token cannot
    /// be persisted.
    pub async fn login(
        &self,
        login_user_dto: &LoginUserDto,
    ) -> Result<ApiResponse<AccessTokenData>, AccountsHttpError> {
        let response: ApiResponse<AccessTokenData> =
            self.client.post(ENDPOINT_LOGIN, login_user_dto).await?;

        if let Some(access_token) = response.session_token() {
            self.set_access_token(access_token)?;
            tracing::info!("Login succeeded, access token stored");
        } else {
            tracing::warn!(message = ?response.message, "Login response carried no access token");
        }

        Ok(response)
    }
}
