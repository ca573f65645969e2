use uuid::Uuid;

use kuesioner::models::{
    CreateQuestion, CreateQuestionnaire, CreateResponse, CreateUser, Question, QuestionType,
    Questionnaire, Response, User,
};
use kuesioner::repositories::{QuestionRepository, QuestionnaireRepository, ResponseRepository, UserRepository};
use kuesioner::services::AuthService;
use kuesioner::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

#[allow(dead_code)]
impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Get the Cookie header value carrying the session
    pub fn session_cookie(&self) -> String {
        format!("session={}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test admin and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("admin-{}@example.com", unique_id);
        let password = "TestPassword123!";

        let input = CreateUser {
            email: email.clone(),
            password: password.to_string(),
            name: format!("Admin {}", unique_id),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a test admin with specific email
    pub async fn create_user_with_email(&self, email: &str, password: &str) -> User {
        let input = CreateUser {
            email: email.to_string(),
            password: password.to_string(),
            name: "Test Admin".to_string(),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap()
    }

    /// Create a questionnaire with a unique name
    pub async fn create_questionnaire(&self) -> Questionnaire {
        let input = CreateQuestionnaire {
            name: format!("Rawat Inap {}", Uuid::new_v4().simple()),
            description: Some("Kuesioner kepuasan pasien".to_string()),
        };

        QuestionnaireRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create an active question
    pub async fn create_question(
        &self,
        questionnaire_id: Uuid,
        label: &str,
        urutan: i32,
        question_type: QuestionType,
    ) -> Question {
        let input = CreateQuestion {
            text: format!("Pertanyaan {} nomor {}", label, urutan),
            label: label.to_string(),
            urutan,
            question_type,
            aktif: true,
        };

        QuestionRepository::create(&self.state.db, questionnaire_id, &input)
            .await
            .unwrap()
    }

    /// Create an inactive question
    pub async fn create_inactive_question(&self, questionnaire_id: Uuid, urutan: i32) -> Question {
        let input = CreateQuestion {
            text: format!("Pertanyaan lama {}", urutan),
            label: "Arsip".to_string(),
            urutan,
            question_type: QuestionType::Scale,
            aktif: false,
        };

        QuestionRepository::create(&self.state.db, questionnaire_id, &input)
            .await
            .unwrap()
    }

    /// Store a response with the given `(question_id, stored value)` answers
    pub async fn create_response(
        &self,
        questionnaire_id: Uuid,
        nama: &str,
        pekerjaan: &str,
        saran: Option<&str>,
        answers: Vec<(Uuid, String)>,
    ) -> Response {
        let input = CreateResponse {
            nama: nama.to_string(),
            usia: 30,
            jenis_kelamin: "Perempuan".to_string(),
            pekerjaan: pekerjaan.to_string(),
            jaminan: "BPJS".to_string(),
            saran: saran.map(str::to_string),
        };

        self.create_response_from(questionnaire_id, input, answers)
            .await
    }

    /// Store a response for a given respondent
    pub async fn create_response_from(
        &self,
        questionnaire_id: Uuid,
        input: CreateResponse,
        answers: Vec<(Uuid, String)>,
    ) -> Response {
        ResponseRepository::create_with_answers(&self.state.db, questionnaire_id, &input, answers)
            .await
            .unwrap()
    }
}
