use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tokio::sync::OnceCell;

/// Reporting functions the dashboard calls. Production databases provision
/// their own; tests install these equivalents over the real tables.
const AGGREGATE_FUNCTIONS: [&str; 3] = [
    r#"
CREATE OR REPLACE FUNCTION get_dashboard_stats(
    p_questionnaire_id UUID,
    start_date DATE DEFAULT NULL,
    end_date DATE DEFAULT NULL,
    p_jenis_kelamin TEXT DEFAULT NULL,
    p_pekerjaan TEXT DEFAULT NULL,
    p_jaminan TEXT DEFAULT NULL
) RETURNS JSONB
LANGUAGE sql STABLE AS $$
    WITH r AS (
        SELECT * FROM responses
        WHERE questionnaire_id = p_questionnaire_id
          AND (start_date IS NULL OR created_at >= start_date::timestamp AT TIME ZONE 'UTC')
          AND (end_date IS NULL OR created_at < (end_date + 1)::timestamp AT TIME ZONE 'UTC')
          AND (p_jenis_kelamin IS NULL OR jenis_kelamin = p_jenis_kelamin)
          AND (p_pekerjaan IS NULL OR pekerjaan = p_pekerjaan)
          AND (p_jaminan IS NULL OR jaminan = p_jaminan)
    )
    SELECT jsonb_build_object(
        'total_responden', (SELECT count(*) FROM r),
        'jenis_kelamin', (
            SELECT COALESCE(jsonb_object_agg(k, n), '{}'::jsonb)
            FROM (SELECT jenis_kelamin AS k, count(*) AS n FROM r GROUP BY 1) g
        ),
        'rentang_usia', (
            SELECT COALESCE(jsonb_object_agg(k, n), '{}'::jsonb)
            FROM (
                SELECT CASE
                           WHEN usia <= 25 THEN '17-25'
                           WHEN usia <= 45 THEN '26-45'
                           ELSE '>45'
                       END AS k,
                       count(*) AS n
                FROM r GROUP BY 1
            ) g
        ),
        'pekerjaan', (
            SELECT COALESCE(jsonb_object_agg(k, n), '{}'::jsonb)
            FROM (SELECT pekerjaan AS k, count(*) AS n FROM r GROUP BY 1) g
        ),
        'jaminan', (
            SELECT COALESCE(jsonb_object_agg(k, n), '{}'::jsonb)
            FROM (SELECT jaminan AS k, count(*) AS n FROM r GROUP BY 1) g
        )
    )
$$
"#,
    r#"
CREATE OR REPLACE FUNCTION get_heatmap_summary(
    p_questionnaire_id UUID,
    start_date DATE DEFAULT NULL,
    end_date DATE DEFAULT NULL,
    p_jenis_kelamin TEXT DEFAULT NULL,
    p_pekerjaan TEXT DEFAULT NULL,
    p_jaminan TEXT DEFAULT NULL
) RETURNS TABLE (
    question_id UUID,
    pertanyaan TEXT,
    sangat_tidak_puas BIGINT,
    tidak_puas BIGINT,
    cukup_puas BIGINT,
    puas BIGINT,
    sangat_puas BIGINT
)
LANGUAGE sql STABLE AS $$
    SELECT q.id,
           q.text,
           SUM(CASE WHEN a.value = '1' THEN 1 END),
           SUM(CASE WHEN a.value = '2' THEN 1 END),
           SUM(CASE WHEN a.value = '3' THEN 1 END),
           SUM(CASE WHEN a.value = '4' THEN 1 END),
           SUM(CASE WHEN a.value = '5' THEN 1 END)
    FROM questions q
    LEFT JOIN answers a
           ON a.question_id = q.id
          AND a.response_id IN (
              SELECT r.id FROM responses r
              WHERE r.questionnaire_id = p_questionnaire_id
                AND (start_date IS NULL OR r.created_at >= start_date::timestamp AT TIME ZONE 'UTC')
                AND (end_date IS NULL OR r.created_at < (end_date + 1)::timestamp AT TIME ZONE 'UTC')
                AND (p_jenis_kelamin IS NULL OR r.jenis_kelamin = p_jenis_kelamin)
                AND (p_pekerjaan IS NULL OR r.pekerjaan = p_pekerjaan)
                AND (p_jaminan IS NULL OR r.jaminan = p_jaminan)
          )
    WHERE q.questionnaire_id = p_questionnaire_id
      AND q.type = 'scale'
    GROUP BY q.id, q.text, q.urutan
    ORDER BY q.urutan
$$
"#,
    r#"
CREATE OR REPLACE FUNCTION get_questionnaire_summary(
    p_questionnaire_id UUID
) RETURNS TABLE (
    question_id UUID,
    pertanyaan TEXT,
    label_jawaban TEXT,
    jumlah_jawaban BIGINT
)
LANGUAGE sql STABLE AS $$
    SELECT q.id, q.text, l.label, count(*)
    FROM questions q
    JOIN answers a ON a.question_id = q.id
    CROSS JOIN LATERAL (
        SELECT CASE
                   WHEN q.type = 'scale' THEN
                       (ARRAY['Sangat Tidak Puas', 'Tidak Puas', 'Cukup Puas', 'Puas', 'Sangat Puas'])[a.value::int]
                   ELSE a.value::jsonb ->> 'choice'
               END AS label
    ) l
    WHERE q.questionnaire_id = p_questionnaire_id
    GROUP BY q.id, q.text, q.urutan, l.label
    ORDER BY q.urutan, l.label
$$
"#,
];

static INSTALLED: OnceCell<()> = OnceCell::const_new();

/// Install the reporting functions once per test binary.
/// The advisory lock keeps concurrent binaries from replacing them at the same time.
pub async fn install_aggregate_functions(db: &DatabaseConnection) {
    INSTALLED
        .get_or_init(|| async {
            let txn = db.begin().await.expect("Failed to begin transaction");
            txn.execute_unprepared("SELECT pg_advisory_xact_lock(5141)")
                .await
                .expect("Failed to take advisory lock");
            for sql in AGGREGATE_FUNCTIONS {
                txn.execute_unprepared(sql)
                    .await
                    .expect("Failed to install aggregate function");
            }
            txn.commit().await.expect("Failed to commit aggregate functions");
        })
        .await;
}
