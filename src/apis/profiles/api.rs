use crate::{
    apis::{
        profiles::{
            CreateProfileRequest, Profile, ProfileCard, ProfileCardsResponse, ProfileResponse,
            UpdateProfileRequest,
        },
        BeanstreamClientInner,
    },
    credentials::ApiFamily,
    Error,
};
use reqwest::Method;
use std::sync::Arc;
use urlencoding::encode;

/// Beanstream payment profiles APIs client.
#[derive(Clone, Debug)]
pub struct ProfilesApi {
    inner: Arc<BeanstreamClientInner>,
}

impl ProfilesApi {
    pub(crate) fn new(inner: Arc<BeanstreamClientInner>) -> Self {
        Self { inner }
    }

    pub fn profile_url(&self) -> String {
        format!("{}/profiles", self.inner.api_base_url())
    }

    pub fn profile_cards_url(&self) -> String {
        format!("{}/cards", self.profile_url())
    }

    fn single_profile_url(&self, customer_code: &str) -> String {
        format!("{}/{}", self.profile_url(), encode(customer_code))
    }

    fn single_profile_cards_url(&self, customer_code: &str) -> String {
        format!("{}/cards/", self.single_profile_url(customer_code))
    }

    fn single_profile_card_url(&self, customer_code: &str, card_index: u32) -> String {
        format!("{}{}", self.single_profile_cards_url(customer_code), card_index)
    }

    /// Whether a profile was created. The new profile id is in `customer_code`.
    pub fn profile_successfully_created(response: &ProfileResponse) -> bool {
        response.is_successful()
    }

    pub fn profile_successfully_deleted(response: &ProfileResponse) -> bool {
        response.is_successful()
    }

    /// Creates a new payment profile.
    #[tracing::instrument(name = "Create Profile", skip_all)]
    pub async fn create_profile(
        &self,
        profile: &CreateProfileRequest,
    ) -> Result<ProfileResponse, Error> {
        self.inner
            .send(
                ApiFamily::Profiles,
                Method::POST,
                self.profile_url(),
                Some(profile),
            )
            .await
    }

    /// Gets an existing payment profile.
    #[tracing::instrument(name = "Get Profile", skip(self))]
    pub async fn get_profile(&self, customer_code: &str) -> Result<Profile, Error> {
        self.inner
            .send_without_body(
                ApiFamily::Profiles,
                Method::GET,
                self.single_profile_url(customer_code),
            )
            .await
    }

    /// Updates the details of an existing payment profile.
    #[tracing::instrument(name = "Update Profile", skip(self, profile))]
    pub async fn update_profile(
        &self,
        customer_code: &str,
        profile: &UpdateProfileRequest,
    ) -> Result<ProfileResponse, Error> {
        self.inner
            .send(
                ApiFamily::Profiles,
                Method::PUT,
                self.single_profile_url(customer_code),
                Some(profile),
            )
            .await
    }

    /// Deletes a payment profile.
    #[tracing::instrument(name = "Delete Profile", skip(self))]
    pub async fn delete_profile(&self, customer_code: &str) -> Result<ProfileResponse, Error> {
        self.inner
            .send_without_body(
                ApiFamily::Profiles,
                Method::DELETE,
                self.single_profile_url(customer_code),
            )
            .await
    }

    /// Adds a card to a payment profile.
    #[tracing::instrument(name = "Add Profile Card", skip(self, card))]
    pub async fn add_profile_card(
        &self,
        customer_code: &str,
        card: &ProfileCard,
    ) -> Result<ProfileResponse, Error> {
        self.inner
            .send(
                ApiFamily::Profiles,
                Method::POST,
                self.single_profile_cards_url(customer_code),
                Some(&CardWrapper { card }),
            )
            .await
    }

    /// Lists the cards stored in a payment profile.
    #[tracing::instrument(name = "Get Profile Cards", skip(self))]
    pub async fn get_profile_cards(
        &self,
        customer_code: &str,
    ) -> Result<ProfileCardsResponse, Error> {
        self.inner
            .send_without_body(
                ApiFamily::Profiles,
                Method::GET,
                self.single_profile_cards_url(customer_code),
            )
            .await
    }

    /// Replaces the card at `card_index` (starting from 1) in a payment profile.
    #[tracing::instrument(name = "Update Profile Card", skip(self, card))]
    pub async fn update_profile_card(
        &self,
        customer_code: &str,
        card_index: u32,
        card: &ProfileCard,
    ) -> Result<ProfileResponse, Error> {
        self.inner
            .send(
                ApiFamily::Profiles,
                Method::PUT,
                self.single_profile_card_url(customer_code, card_index),
                Some(&CardWrapper { card }),
            )
            .await
    }

    /// Removes the card at `card_index` (starting from 1) from a payment profile.
    #[tracing::instrument(name = "Delete Profile Card", skip(self))]
    pub async fn delete_profile_card(
        &self,
        customer_code: &str,
        card_index: u32,
    ) -> Result<ProfileResponse, Error> {
        self.inner
            .send_without_body(
                ApiFamily::Profiles,
                Method::DELETE,
                self.single_profile_card_url(customer_code, card_index),
            )
            .await
    }
}

#[derive(serde::Serialize)]
struct CardWrapper<'a> {
    card: &'a ProfileCard,
}
